//! Spending report
//!
//! Aggregates transaction totals by category, optionally scoped to a month.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Category, Money, Month};
use crate::storage::UserStore;

/// Spending totals for one category
#[derive(Debug, Clone)]
pub struct CategorySpending {
    pub category: Category,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of total spending, 0-100
    pub percentage: f64,
}

/// Spending report, biggest category first
#[derive(Debug, Clone)]
pub struct SpendingReport {
    /// The month the report covers, or None for all time
    pub month: Option<Month>,
    pub categories: Vec<CategorySpending>,
    pub total_spending: Money,
    pub total_transactions: usize,
}

impl SpendingReport {
    /// Generate a spending-by-category report
    ///
    /// Categories with zero total are left out, so an all-zero month yields
    /// an empty report rather than a table of zeros.
    pub fn generate(store: &UserStore, month: Option<Month>) -> SpendlogResult<Self> {
        let transactions = match month {
            Some(m) => store.transactions.get_by_month(m)?,
            None => store.transactions.get_all()?,
        };

        let mut by_category: HashMap<Category, (Money, usize)> = HashMap::new();
        let mut total_spending = Money::zero();

        for txn in &transactions {
            let entry = by_category
                .entry(txn.category.clone())
                .or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
            total_spending += txn.amount;
        }

        let mut categories: Vec<CategorySpending> = by_category
            .into_iter()
            .filter(|(_, (total, _))| !total.is_zero())
            .map(|(category, (total, transaction_count))| {
                let percentage = if total_spending.is_zero() {
                    0.0
                } else {
                    (total.cents() as f64 / total_spending.cents() as f64) * 100.0
                };
                CategorySpending {
                    category,
                    total,
                    transaction_count,
                    percentage,
                }
            })
            .collect();

        // Biggest spender first, category name as tiebreaker
        categories.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });

        Ok(Self {
            month,
            categories,
            total_spending,
            total_transactions: transactions.len(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        match self.month {
            Some(month) => output.push_str(&format!("Spending by Category: {}\n", month)),
            None => output.push_str("Spending by Category: all time\n"),
        }
        output.push_str(&"=".repeat(66));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No spending recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<35} {:>12} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(66));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<35} {:>12} {:>8} {:>7.1}%\n",
                row.category.as_str(),
                row.total.to_string(),
                row.transaction_count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(66));
        output.push('\n');
        output.push_str(&format!(
            "{:<35} {:>12} {:>8}\n",
            "TOTAL",
            self.total_spending.to_string(),
            self.total_transactions
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SpendlogResult<()> {
        writeln!(writer, "Month,Category,Amount,Transaction Count,Percentage")
            .map_err(SpendlogError::from)?;

        let month_label = self
            .month
            .map(|m| m.to_string())
            .unwrap_or_else(|| "all".to_string());

        for row in &self.categories {
            writeln!(
                writer,
                "{},{},{:.2},{},{:.2}",
                month_label,
                row.category,
                row.total.cents() as f64 / 100.0,
                row.transaction_count,
                row.percentage
            )
            .map_err(SpendlogError::from)?;
        }

        writeln!(
            writer,
            "{},TOTAL,{:.2},{},100.00",
            month_label,
            self.total_spending.cents() as f64 / 100.0,
            self.total_transactions
        )
        .map_err(SpendlogError::from)?;

        Ok(())
    }
}
