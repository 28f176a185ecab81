//! Storage layer for spendlog
//!
//! Provides CSV flat-file storage with atomic writes. The user registry is a
//! single global file; transaction and goal records live in a directory per
//! user, so one user's data can never leak into another's files.

pub mod csv_io;
pub mod goals;
pub mod transactions;
pub mod users;

pub use csv_io::{read_records, write_records_atomic};
pub use goals::GoalRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

use crate::config::paths::SpendlogPaths;
use crate::error::SpendlogError;
use crate::models::UserId;

/// Main storage coordinator holding the global user registry
pub struct Storage {
    paths: SpendlogPaths,
    pub users: UserRepository,
}

impl Storage {
    /// Create a new Storage instance and load the user registry
    pub fn new(paths: SpendlogPaths) -> Result<Self, SpendlogError> {
        paths.ensure_directories()?;

        let users = UserRepository::new(paths.users_file());
        users.load()?;

        Ok(Self { paths, users })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SpendlogPaths {
        &self.paths
    }

    /// Open one user's record store, creating its directory on first use
    pub fn open_user(&self, user_id: UserId) -> Result<UserStore, SpendlogError> {
        self.paths.ensure_user_dir(user_id)?;

        let transactions = TransactionRepository::new(self.paths.transactions_file(user_id));
        transactions.load()?;

        let goals = GoalRepository::new(self.paths.goals_file(user_id));
        goals.load()?;

        Ok(UserStore {
            user_id,
            transactions,
            goals,
        })
    }
}

/// One user's transaction and goal repositories
pub struct UserStore {
    user_id: UserId,
    pub transactions: TransactionRepository,
    pub goals: GoalRepository,
}

impl UserStore {
    /// The user this store is scoped to
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.paths().users_file().exists());
    }

    #[test]
    fn test_open_user_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let user_id = UserId::new();
        let store = storage.open_user(user_id).unwrap();

        assert_eq!(store.user_id(), user_id);
        assert!(storage.paths().user_dir(user_id).exists());
        assert_eq!(store.transactions.count().unwrap(), 0);
        assert_eq!(store.goals.count().unwrap(), 0);
    }

    #[test]
    fn test_user_stores_are_disjoint() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let alice = UserId::new();
        let bob = UserId::new();

        let alice_store = storage.open_user(alice).unwrap();
        let txn = crate::models::Transaction::new(
            alice,
            chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            "lunch",
            crate::models::Category::parse("Dining").unwrap(),
            crate::models::Money::from_cents(1200),
        );
        alice_store.transactions.upsert(txn).unwrap();
        alice_store.transactions.save().unwrap();

        let bob_store = storage.open_user(bob).unwrap();
        assert_eq!(bob_store.transactions.count().unwrap(), 0);
    }
}
