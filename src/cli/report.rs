//! Report CLI commands

use clap::Subcommand;

use crate::error::SpendlogResult;
use crate::reports::{MonthlyTotalsReport, SpendingReport};
use crate::storage::UserStore;

use super::parse_month;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending by category
    Spending {
        /// Limit to one month (YYYY-MM)
        #[arg(short = 'M', long)]
        month: Option<String>,
        /// Emit CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// Month-by-month totals
    Monthly {
        /// Emit CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(store: &UserStore, cmd: ReportCommands) -> SpendlogResult<()> {
    match cmd {
        ReportCommands::Spending { month, csv } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let report = SpendingReport::generate(store, month)?;

            if csv {
                report.export_csv(&mut std::io::stdout())?;
            } else {
                print!("{}", report.format_terminal());
            }
        }

        ReportCommands::Monthly { csv } => {
            let report = MonthlyTotalsReport::generate(store)?;

            if csv {
                report.export_csv(&mut std::io::stdout())?;
            } else {
                print!("{}", report.format_terminal());
            }
        }
    }

    Ok(())
}
