//! Transaction model
//!
//! A transaction is a single recorded expense: a date, a free-form
//! description, a category, and a non-negative amount.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{TransactionId, UserId};
use super::money::Money;
use super::month::Month;

/// Longest accepted description
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// A single recorded expense for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The user this transaction belongs to
    pub user_id: UserId,

    /// Transaction date
    pub date: NaiveDate,

    /// Free-form description (trimmed, may be empty)
    #[serde(default)]
    pub description: String,

    /// Spending category
    pub category: Category,

    /// Expense amount (non-negative magnitude)
    pub amount: Money,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        description: impl Into<String>,
        category: Category,
        amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            user_id,
            date,
            description: description.into().trim().to_string(),
            category,
            amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// The calendar month this transaction falls in
    pub fn month(&self) -> Month {
        Month::from_date(self.date)
    }

    /// Mark the transaction as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the transaction fields
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        self.amount
            .validate_amount()
            .map_err(TransactionValidationError::Amount)?;

        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(TransactionValidationError::DescriptionTooLong(
                self.description.chars().count(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount,
            self.description
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    Amount(super::money::MoneyValidationError),
    DescriptionTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(e) => write!(f, "{}", e),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description is too long: {} characters (limit {})",
                len, MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
