//! Transaction repository for CSV storage
//!
//! Manages one user's transactions.csv with in-memory indexes by category
//! and by calendar month.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendlogError;
use crate::models::{Category, Month, Transaction, TransactionId};

use super::csv_io::{read_records, write_records_atomic};

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: category -> transaction_ids
    by_category: RwLock<HashMap<Category, Vec<TransactionId>>>,
    /// Index: month -> transaction_ids
    by_month: RwLock<HashMap<Month, Vec<TransactionId>>>,
}

/// Newest-first ordering: date desc, then created_at desc
fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
            by_month: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build indexes
    pub fn load(&self) -> Result<(), SpendlogError> {
        let records: Vec<Transaction> = read_records(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_month = self
            .by_month
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_category.clear();
        by_month.clear();

        for txn in records {
            let id = txn.id;
            by_category.entry(txn.category.clone()).or_default().push(id);
            by_month.entry(txn.month()).or_default().push(id);
            data.insert(id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> Result<(), SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);

        write_records_atomic(&self.path, &transactions)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions for a category, newest first
    pub fn get_by_category(&self, category: &Category) -> Result<Vec<Transaction>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_category = self
            .by_category
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_category.get(category).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions for a calendar month, newest first
    pub fn get_by_month(&self, month: Month) -> Result<Vec<Transaction>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_month = self
            .by_month
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_month.get(&month).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), SpendlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_month = self
            .by_month
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove from old indexes if updating
        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_category.get_mut(&old.category) {
                ids.retain(|&id| id != txn.id);
            }
            if let Some(ids) = by_month.get_mut(&old.month()) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_category.entry(txn.category.clone()).or_default().push(txn.id);
        by_month.entry(txn.month()).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, SpendlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_month = self
            .by_month
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(txn) = data.remove(&id) {
            if let Some(ids) = by_category.get_mut(&txn.category) {
                ids.retain(|&tid| tid != id);
            }
            if let Some(ids) = by_month.get_mut(&txn.month()) {
                ids.retain(|&tid| tid != id);
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, UserId};
    use chrono::{Datelike, NaiveDate};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn txn(date: (i32, u32, u32), category: &str, cents: i64) -> Transaction {
        Transaction::new(
            UserId::new(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            "",
            Category::parse(category).unwrap(),
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let t = txn((2025, 1, 15), "Groceries", 5000);
        let id = t.id;
        repo.upsert(t).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 5000);
    }

    #[test]
    fn test_get_by_category() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(txn((2025, 1, 10), "Groceries", 100)).unwrap();
        repo.upsert(txn((2025, 1, 11), "Groceries", 200)).unwrap();
        repo.upsert(txn((2025, 1, 12), "Dining", 300)).unwrap();

        let groceries = repo
            .get_by_category(&Category::parse("Groceries").unwrap())
            .unwrap();
        assert_eq!(groceries.len(), 2);

        let dining = repo
            .get_by_category(&Category::parse("Dining").unwrap())
            .unwrap();
        assert_eq!(dining.len(), 1);
    }

    #[test]
    fn test_get_by_month() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(txn((2025, 1, 10), "Groceries", 100)).unwrap();
        repo.upsert(txn((2025, 1, 31), "Groceries", 200)).unwrap();
        repo.upsert(txn((2025, 2, 1), "Groceries", 300)).unwrap();

        let jan = repo.get_by_month(Month::new(2025, 1).unwrap()).unwrap();
        assert_eq!(jan.len(), 2);

        let feb = repo.get_by_month(Month::new(2025, 2).unwrap()).unwrap();
        assert_eq!(feb.len(), 1);
    }

    #[test]
    fn test_reindex_on_update() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let mut t = txn((2025, 1, 15), "Groceries", 5000);
        let id = t.id;
        repo.upsert(t.clone()).unwrap();

        // Move to a different category and month
        t.category = Category::parse("Dining").unwrap();
        t.date = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap();
        repo.upsert(t).unwrap();

        assert!(repo
            .get_by_category(&Category::parse("Groceries").unwrap())
            .unwrap()
            .is_empty());
        assert!(repo.get_by_month(Month::new(2025, 1).unwrap()).unwrap().is_empty());

        let dining = repo
            .get_by_category(&Category::parse("Dining").unwrap())
            .unwrap();
        assert_eq!(dining.len(), 1);
        assert_eq!(dining[0].id, id);
    }

    #[test]
    fn test_ordering_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(txn((2025, 1, 10), "Groceries", 100)).unwrap();
        repo.upsert(txn((2025, 1, 20), "Groceries", 200)).unwrap();
        repo.upsert(txn((2025, 1, 15), "Groceries", 300)).unwrap();

        let all = repo.get_all().unwrap();
        let dates: Vec<_> = all.iter().map(|t| t.date.day()).collect();
        assert_eq!(dates, vec![20, 15, 10]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let t = txn((2025, 1, 15), "Groceries", 5000);
        let id = t.id;
        repo.upsert(t).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.csv"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        let retrieved = repo2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 5000);
        assert_eq!(retrieved.category.as_str(), "Groceries");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let t = txn((2025, 1, 15), "Groceries", 5000);
        let id = t.id;
        repo.upsert(t).unwrap();
        assert_eq!(repo.count().unwrap(), 1);

        assert!(repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
        assert!(!repo.delete(id).unwrap());
    }
}
