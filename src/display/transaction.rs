//! Transaction display formatting

use crate::models::Transaction;

/// Format a single transaction for display (list row)
pub fn format_transaction_row(txn: &Transaction) -> String {
    let description = if txn.description.is_empty() {
        "(no description)".to_string()
    } else {
        txn.description.clone()
    };

    format!(
        "{:<12} {} {:<24} {:<16} {:>12}",
        txn.id.to_string(),
        txn.date.format("%Y-%m-%d"),
        truncate(&description, 24),
        truncate(txn.category.as_str(), 16),
        txn.amount.to_string()
    )
}

/// Format a list of transactions as a table
pub fn format_transaction_list(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:<10} {:<24} {:<16} {:>12}\n",
        "Id", "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(78));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Amount:      {}\n", txn.amount));
    output.push_str(&format!("Category:    {}\n", txn.category));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output.push_str(&format!("Recorded:    {}\n", txn.created_at.format("%Y-%m-%d %H:%M")));

    output
}

/// Truncate a string to a maximum length
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
