//! Business logic services for spendlog
//!
//! Services sit between the CLI and the storage layer: they validate input,
//! enforce uniqueness rules, and decide when repositories persist.

pub mod budget;
pub mod goal;
pub mod transaction;
pub mod user;

pub use budget::{BudgetService, BudgetStatus, Standing};
pub use goal::{GoalService, GoalUpdate, SetGoalOutcome};
pub use transaction::{TransactionFilter, TransactionService, TransactionUpdate};
pub use user::UserService;
