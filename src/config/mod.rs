//! Configuration module for spendlog
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Settings persistence
//! - Per-user data directory layout

pub mod paths;
pub mod settings;

pub use paths::SpendlogPaths;
pub use settings::Settings;
