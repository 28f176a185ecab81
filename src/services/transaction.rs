//! Transaction service
//!
//! CRUD over one user's transaction records with filtered listing.

use chrono::NaiveDate;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Category, Money, Month, Transaction, TransactionId};
use crate::storage::UserStore;

/// Filter for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub month: Option<Month>,
    pub category: Option<Category>,
    pub limit: Option<usize>,
}

/// Fields that can change on an existing transaction
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub amount: Option<Money>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.amount.is_none()
    }
}

/// Service for transaction management, scoped to one user's store
pub struct TransactionService<'a> {
    store: &'a UserStore,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(store: &'a UserStore) -> Self {
        Self { store }
    }

    /// Record a new transaction
    pub fn create(
        &self,
        date: NaiveDate,
        description: &str,
        category: Category,
        amount: Money,
    ) -> SpendlogResult<Transaction> {
        let transaction =
            Transaction::new(self.store.user_id(), date, description, category, amount);
        transaction
            .validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        self.store.transactions.upsert(transaction.clone())?;
        self.store.transactions.save()?;

        Ok(transaction)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> SpendlogResult<Transaction> {
        self.store
            .transactions
            .get(id)?
            .ok_or_else(|| SpendlogError::transaction_not_found(id.to_string()))
    }

    /// List transactions matching a filter, newest first
    pub fn list(&self, filter: &TransactionFilter) -> SpendlogResult<Vec<Transaction>> {
        let mut transactions = match (&filter.month, &filter.category) {
            (Some(month), None) => self.store.transactions.get_by_month(*month)?,
            (None, Some(category)) => self.store.transactions.get_by_category(category)?,
            (Some(month), Some(category)) => {
                let mut txns = self.store.transactions.get_by_month(*month)?;
                txns.retain(|t| &t.category == category);
                txns
            }
            (None, None) => self.store.transactions.get_all()?,
        };

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Update fields on an existing transaction
    pub fn update(
        &self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> SpendlogResult<Transaction> {
        let mut transaction = self.get(id)?;

        if let Some(date) = update.date {
            transaction.date = date;
        }
        if let Some(description) = update.description {
            transaction.description = description.trim().to_string();
        }
        if let Some(category) = update.category {
            transaction.category = category;
        }
        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }

        transaction
            .validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;
        transaction.touch();

        self.store.transactions.upsert(transaction.clone())?;
        self.store.transactions.save()?;

        Ok(transaction)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> SpendlogResult<()> {
        if !self.store.transactions.delete(id)? {
            return Err(SpendlogError::transaction_not_found(id.to_string()));
        }
        self.store.transactions.save()
    }

    /// Count transactions
    pub fn count(&self) -> SpendlogResult<usize> {
        self.store.transactions.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendlogPaths;
    use crate::models::UserId;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, UserStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let store = storage.open_user(UserId::new()).unwrap();
        (temp_dir, store)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cat(name: &str) -> Category {
        Category::parse(name).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);

        let txn = service
            .create(date(2025, 1, 15), "  lunch  ", cat("Dining"), Money::from_cents(1250))
            .unwrap();

        assert_eq!(txn.description, "lunch");
        let found = service.get(txn.id).unwrap();
        assert_eq!(found.amount.cents(), 1250);
        assert_eq!(found.user_id, store.user_id());
    }

    #[test]
    fn test_create_rejects_invalid_amount() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);

        let result = service.create(
            date(2025, 1, 15),
            "refund gone wrong",
            cat("Dining"),
            Money::from_cents(-100),
        );
        assert!(matches!(result, Err(SpendlogError::Validation(_))));

        let result = service.create(
            date(2025, 1, 15),
            "yacht",
            cat("Travel"),
            Money::from_cents(1_000_000_001),
        );
        assert!(matches!(result, Err(SpendlogError::Validation(_))));
    }

    #[test]
    fn test_list_filters_and_limit() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);

        service
            .create(date(2025, 1, 10), "groceries", cat("Groceries"), Money::from_cents(5000))
            .unwrap();
        service
            .create(date(2025, 1, 20), "dinner", cat("Dining"), Money::from_cents(3000))
            .unwrap();
        service
            .create(date(2025, 2, 5), "dinner", cat("Dining"), Money::from_cents(2000))
            .unwrap();

        let jan = service
            .list(&TransactionFilter {
                month: Some(Month::new(2025, 1).unwrap()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(jan.len(), 2);
        // Newest first
        assert_eq!(jan[0].date, date(2025, 1, 20));

        let jan_dining = service
            .list(&TransactionFilter {
                month: Some(Month::new(2025, 1).unwrap()),
                category: Some(cat("Dining")),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(jan_dining.len(), 1);

        let limited = service
            .list(&TransactionFilter {
                limit: Some(2),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].date, date(2025, 2, 5));
    }

    #[test]
    fn test_update_partial() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);

        let txn = service
            .create(date(2025, 1, 15), "lunch", cat("Dining"), Money::from_cents(1250))
            .unwrap();

        let updated = service
            .update(
                txn.id,
                TransactionUpdate {
                    amount: Some(Money::from_cents(1500)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount.cents(), 1500);
        assert_eq!(updated.description, "lunch");
        assert_eq!(updated.category.as_str(), "Dining");
        assert!(updated.updated_at >= txn.updated_at);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);

        let result = service.update(TransactionId::new(), TransactionUpdate::default());
        assert!(matches!(result, Err(SpendlogError::NotFound { .. })));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);

        let txn = service
            .create(date(2025, 1, 15), "lunch", cat("Dining"), Money::from_cents(1250))
            .unwrap();

        service.delete(txn.id).unwrap();
        assert_eq!(service.count().unwrap(), 0);
        assert!(matches!(
            service.delete(txn.id),
            Err(SpendlogError::NotFound { .. })
        ));
    }
}
