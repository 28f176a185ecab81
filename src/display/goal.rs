//! Goal display formatting

use crate::models::Goal;

use super::transaction::truncate;

/// Format a single goal for display (list row)
pub fn format_goal_row(goal: &Goal) -> String {
    format!(
        "{:<12} {:<8} {:<24} {:>12}",
        goal.id.to_string(),
        goal.month.to_string(),
        truncate(goal.category.as_str(), 24),
        goal.target.to_string()
    )
}

/// Format a list of goals as a table
pub fn format_goal_list(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return "No goals set.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:<8} {:<24} {:>12}\n",
        "Id", "Month", "Category", "Target"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for goal in goals {
        output.push_str(&format_goal_row(goal));
        output.push('\n');
    }

    output
}

/// Format goal details for display
pub fn format_goal_details(goal: &Goal) -> String {
    let mut output = String::new();

    output.push_str(&format!("Goal:     {}\n", goal.id));
    output.push_str(&format!("Month:    {}\n", goal.month));
    output.push_str(&format!("Category: {}\n", goal.category));
    output.push_str(&format!("Target:   {}\n", goal.target));

    output
}
