//! Budget evaluator
//!
//! Compares goals against actual spending. Remaining = target - spent; a
//! goal with zero remaining still counts as under budget.

use std::fmt;

use crate::error::SpendlogResult;
use crate::models::{Category, Goal, GoalId, Money, Month};
use crate::storage::UserStore;

/// Whether spending stayed within the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Under,
    Over,
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standing::Under => write!(f, "Under Budget"),
            Standing::Over => write!(f, "Over Budget"),
        }
    }
}

/// One goal's target measured against the month's spending in its category
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub goal_id: GoalId,
    pub month: Month,
    pub category: Category,
    pub target: Money,
    pub spent: Money,
    pub remaining: Money,
    pub standing: Standing,
}

/// Service computing budget standing, scoped to one user's store
pub struct BudgetService<'a> {
    store: &'a UserStore,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(store: &'a UserStore) -> Self {
        Self { store }
    }

    /// Total spent in a category during a month
    ///
    /// A category with no transactions spends zero.
    pub fn spent(&self, month: Month, category: &Category) -> SpendlogResult<Money> {
        let transactions = self.store.transactions.get_by_month(month)?;
        Ok(transactions
            .iter()
            .filter(|t| &t.category == category)
            .map(|t| t.amount)
            .sum())
    }

    /// Evaluate one goal against actual spending
    pub fn evaluate_goal(&self, goal: &Goal) -> SpendlogResult<BudgetStatus> {
        let spent = self.spent(goal.month, &goal.category)?;
        let remaining = goal.target - spent;
        let standing = if remaining.is_negative() {
            Standing::Over
        } else {
            Standing::Under
        };

        Ok(BudgetStatus {
            goal_id: goal.id,
            month: goal.month,
            category: goal.category.clone(),
            target: goal.target,
            spent,
            remaining,
            standing,
        })
    }

    /// Evaluate every goal for one month, sorted by category
    pub fn evaluate_month(&self, month: Month) -> SpendlogResult<Vec<BudgetStatus>> {
        self.store
            .goals
            .get_by_month(month)?
            .iter()
            .map(|goal| self.evaluate_goal(goal))
            .collect()
    }

    /// Evaluate every goal, sorted by month then category
    pub fn evaluate_all(&self) -> SpendlogResult<Vec<BudgetStatus>> {
        self.store
            .goals
            .get_all()?
            .iter()
            .map(|goal| self.evaluate_goal(goal))
            .collect()
    }
}
