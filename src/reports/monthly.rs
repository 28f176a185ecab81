//! Monthly totals report
//!
//! Rolls transactions up into one row per month, oldest first.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Money, Month};
use crate::storage::UserStore;

/// Totals for one month
#[derive(Debug, Clone)]
pub struct MonthTotal {
    pub month: Month,
    pub total: Money,
    pub transaction_count: usize,
}

/// Month-by-month spending totals
#[derive(Debug, Clone)]
pub struct MonthlyTotalsReport {
    pub months: Vec<MonthTotal>,
    pub total_spending: Money,
    pub total_transactions: usize,
}

impl MonthlyTotalsReport {
    /// Generate monthly totals across all transactions
    pub fn generate(store: &UserStore) -> SpendlogResult<Self> {
        let transactions = store.transactions.get_all()?;

        let mut by_month: HashMap<Month, (Money, usize)> = HashMap::new();
        let mut total_spending = Money::zero();

        for txn in &transactions {
            let entry = by_month.entry(txn.month()).or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
            total_spending += txn.amount;
        }

        let mut months: Vec<MonthTotal> = by_month
            .into_iter()
            .map(|(month, (total, transaction_count))| MonthTotal {
                month,
                total,
                transaction_count,
            })
            .collect();
        months.sort_by_key(|row| row.month);

        Ok(Self {
            months,
            total_spending,
            total_transactions: transactions.len(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Monthly Spending\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No spending recorded.\n");
            return output;
        }

        output.push_str(&format!("{:<10} {:>12} {:>8}\n", "Month", "Amount", "Count"));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        for row in &self.months {
            output.push_str(&format!(
                "{:<10} {:>12} {:>8}\n",
                row.month.to_string(),
                row.total.to_string(),
                row.transaction_count
            ));
        }

        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>12} {:>8}\n",
            "TOTAL",
            self.total_spending.to_string(),
            self.total_transactions
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SpendlogResult<()> {
        writeln!(writer, "Month,Amount,Transaction Count").map_err(SpendlogError::from)?;

        for row in &self.months {
            writeln!(
                writer,
                "{},{:.2},{}",
                row.month,
                row.total.cents() as f64 / 100.0,
                row.transaction_count
            )
            .map_err(SpendlogError::from)?;
        }

        writeln!(
            writer,
            "TOTAL,{:.2},{}",
            self.total_spending.cents() as f64 / 100.0,
            self.total_transactions
        )
        .map_err(SpendlogError::from)?;

        Ok(())
    }
}
