//! Display formatting for terminal output
//!
//! Formats data models as plain-text tables for the terminal.

pub mod budget;
pub mod goal;
pub mod transaction;

pub use budget::{format_status_list, format_status_row};
pub use goal::{format_goal_details, format_goal_list, format_goal_row};
pub use transaction::{format_transaction_details, format_transaction_list, format_transaction_row};
