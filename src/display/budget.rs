//! Budget status display formatting

use crate::services::BudgetStatus;

use super::transaction::truncate;

/// Format a single budget status for display (list row)
pub fn format_status_row(status: &BudgetStatus) -> String {
    format!(
        "{:<8} {:<20} {:>12} {:>12} {:>12}  {}",
        status.month.to_string(),
        truncate(status.category.as_str(), 20),
        status.target.to_string(),
        status.spent.to_string(),
        status.remaining.to_string(),
        status.standing
    )
}

/// Format a list of budget statuses as a table
pub fn format_status_list(statuses: &[BudgetStatus]) -> String {
    if statuses.is_empty() {
        return "No goals set.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:<20} {:>12} {:>12} {:>12}  {}\n",
        "Month", "Category", "Goal", "Spent", "Remaining", "Status"
    ));
    output.push_str(&"-".repeat(84));
    output.push('\n');

    for status in statuses {
        output.push_str(&format_status_row(status));
        output.push('\n');
    }

    output
}
