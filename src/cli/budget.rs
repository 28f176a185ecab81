//! Budget CLI commands

use clap::Subcommand;

use crate::display::format_status_list;
use crate::error::SpendlogResult;
use crate::models::Month;
use crate::services::BudgetService;
use crate::storage::UserStore;

use super::parse_month;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show goal standing against actual spending
    Status {
        /// Month to evaluate (YYYY-MM, defaults to the current month)
        #[arg(short = 'M', long)]
        month: Option<String>,
        /// Evaluate every goal across all months
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(store: &UserStore, cmd: BudgetCommands) -> SpendlogResult<()> {
    let service = BudgetService::new(store);

    match cmd {
        BudgetCommands::Status { month, all } => {
            let statuses = if all {
                println!("Budget Status: all months");
                service.evaluate_all()?
            } else {
                let month = match month.as_deref() {
                    Some(m) => parse_month(m)?,
                    None => Month::current(),
                };
                println!("Budget Status: {}", month);
                service.evaluate_month(month)?
            };

            print!("{}", format_status_list(&statuses));
        }
    }

    Ok(())
}
