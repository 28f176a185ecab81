//! Core data models for spendlog
//!
//! This module contains the data structures that represent the expense
//! tracking domain: users, transactions, goals, money, and months.

pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;
pub mod user;

pub use category::Category;
pub use goal::Goal;
pub use ids::{GoalId, TransactionId, UserId};
pub use money::Money;
pub use month::Month;
pub use transaction::Transaction;
pub use user::User;
