//! Path management for spendlog
//!
//! Provides XDG-compliant path resolution for configuration and per-user data.
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDLOG_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/spendlog` or `~/.config/spendlog`
//! 3. Windows: `%APPDATA%\spendlog`

use std::path::PathBuf;

use crate::error::SpendlogError;
use crate::models::UserId;

/// Manages all paths used by spendlog
#[derive(Debug, Clone)]
pub struct SpendlogPaths {
    /// Base directory for all spendlog data
    base_dir: PathBuf,
}

impl SpendlogPaths {
    /// Create a new SpendlogPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SpendlogError> {
        let base_dir = if let Ok(custom) = std::env::var("SPENDLOG_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SpendlogPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/spendlog/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding per-user subdirectories
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the global user registry
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.csv")
    }

    /// Get the data directory for one user
    pub fn user_dir(&self, user_id: UserId) -> PathBuf {
        self.data_dir().join(user_id.as_uuid().to_string())
    }

    /// Get the path to a user's transactions.csv
    pub fn transactions_file(&self, user_id: UserId) -> PathBuf {
        self.user_dir(user_id).join("transactions.csv")
    }

    /// Get the path to a user's goals.csv
    pub fn goals_file(&self, user_id: UserId) -> PathBuf {
        self.user_dir(user_id).join("goals.csv")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SpendlogError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendlogError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SpendlogError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Ensure one user's data directory exists
    pub fn ensure_user_dir(&self, user_id: UserId) -> Result<(), SpendlogError> {
        std::fs::create_dir_all(self.user_dir(user_id)).map_err(|e| {
            SpendlogError::Io(format!(
                "Failed to create data directory for {}: {}",
                user_id, e
            ))
        })
    }

    /// Check if spendlog has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SpendlogError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("spendlog"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SpendlogError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SpendlogError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("spendlog"))
}
