//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Entity IDs typed at
//! the terminal may be full UUIDs or the short prefixed form shown in lists.

pub mod budget;
pub mod goal;
pub mod report;
pub mod transaction;
pub mod user;

pub use budget::{handle_budget_command, BudgetCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use user::{handle_user_command, UserCommands};

use chrono::{Local, NaiveDate};

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Category, Money, Month};

/// Parse a YYYY-MM month argument
pub(crate) fn parse_month(s: &str) -> SpendlogResult<Month> {
    s.parse().map_err(|e| {
        SpendlogError::Validation(format!("Invalid month '{}': {}. Use YYYY-MM.", s, e))
    })
}

/// Parse a category argument
pub(crate) fn parse_category(s: &str) -> SpendlogResult<Category> {
    Category::parse(s).map_err(|e| SpendlogError::Validation(format!("Invalid category: {}", e)))
}

/// Parse a dollar amount argument like "12.50" or "$12.50"
pub(crate) fn parse_amount(s: &str) -> SpendlogResult<Money> {
    Money::parse(s).map_err(|e| {
        SpendlogError::Validation(format!(
            "Invalid amount '{}': {}. Use format like '12.50'.",
            s, e
        ))
    })
}

/// Parse a YYYY-MM-DD date argument, defaulting to today
pub(crate) fn parse_date(s: Option<&str>) -> SpendlogResult<NaiveDate> {
    match s {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
            SpendlogError::Validation(format!("Invalid date '{}': {}. Use YYYY-MM-DD.", s, e))
        }),
        None => Ok(Local::now().date_naive()),
    }
}
