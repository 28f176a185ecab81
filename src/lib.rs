//! spendlog - Multi-user expense tracker for the terminal
//!
//! This library provides the core functionality for spendlog, a multi-user
//! expense tracker backed by per-user CSV flat files. Each user records
//! transactions, sets monthly per-category spending goals, and checks how
//! actual spending stands against those goals.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, transactions, goals)
//! - `storage`: CSV flat-file storage layer
//! - `services`: Business logic layer
//! - `reports`: Aggregated spending views
//! - `display`: Terminal output formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use spendlog::config::{paths::SpendlogPaths, settings::Settings};
//!
//! let paths = SpendlogPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::SpendlogError;
