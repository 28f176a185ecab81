//! User repository for CSV storage
//!
//! Manages the global user registry in users.csv.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendlogError;
use crate::models::{User, UserId};

use super::csv_io::{read_records, write_records_atomic};

/// Repository for user persistence with an email index
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
    /// Index: normalized email -> user_id
    by_email: RwLock<HashMap<String, UserId>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_email: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk and build the email index
    pub fn load(&self) -> Result<(), SpendlogError> {
        let records: Vec<User> = read_records(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_email = self
            .by_email
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_email.clear();

        for user in records {
            by_email.insert(user.email.clone(), user.id);
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));

        write_records_atomic(&self.path, &users)
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<User>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get a user by normalized email
    pub fn get_by_email(&self, email: &str) -> Result<Option<User>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_email = self
            .by_email
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_email.get(email).and_then(|id| data.get(id).cloned()))
    }

    /// Get all users, sorted by email
    pub fn get_all(&self) -> Result<Vec<User>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), SpendlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_email = self
            .by_email
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove the old email mapping if it changed
        if let Some(old) = data.get(&user.id) {
            if old.email != user.email {
                by_email.remove(&old.email);
            }
        }

        by_email.insert(user.email.clone(), user.id);
        data.insert(user.id, user);
        Ok(())
    }

    /// Count users
    pub fn count(&self) -> Result<usize, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
