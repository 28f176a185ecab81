//! Goal model
//!
//! A goal is a target spending amount for one category in one calendar month.
//! A user holds at most one goal per (month, category) pair; the goal service
//! enforces the uniqueness and upserts on that key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{GoalId, UserId};
use super::money::Money;
use super::month::Month;

/// A per-month, per-category target spending amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// The user this goal belongs to
    pub user_id: UserId,

    /// The month the goal applies to
    pub month: Month,

    /// The category the goal applies to
    pub category: Category,

    /// Target spending amount (non-negative magnitude)
    pub target: Money,

    /// When the goal was created
    pub created_at: DateTime<Utc>,

    /// When the goal was last modified
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal
    pub fn new(user_id: UserId, month: Month, category: Category, target: Money) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            user_id,
            month,
            category,
            target,
            created_at: now,
            updated_at: now,
        }
    }

    /// The (month, category) slot this goal occupies
    pub fn slot(&self) -> (Month, Category) {
        (self.month, self.category.clone())
    }

    /// Mark the goal as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the goal fields
    pub fn validate(&self) -> Result<(), super::money::MoneyValidationError> {
        self.target.validate_amount()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.month, self.category, self.target)
    }
}
