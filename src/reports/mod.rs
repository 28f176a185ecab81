//! Reports module for spendlog
//!
//! Aggregated views over one user's transactions: spending by category and
//! month-by-month totals, each with terminal and CSV output.

pub mod monthly;
pub mod spending;

pub use monthly::{MonthTotal, MonthlyTotalsReport};
pub use spending::{CategorySpending, SpendingReport};
