//! Transaction CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_list};
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::TransactionId;
use crate::services::{TransactionFilter, TransactionService, TransactionUpdate};
use crate::storage::UserStore;

use super::{parse_amount, parse_category, parse_date, parse_month};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category name
        category: String,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by month (YYYY-MM)
        #[arg(short = 'M', long)]
        month: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Show all matching transactions
        #[arg(short, long)]
        all: bool,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or short form)
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (full or short form)
        id: String,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    store: &UserStore,
    settings: &Settings,
    cmd: TransactionCommands,
) -> SpendlogResult<()> {
    let service = TransactionService::new(store);

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let txn = service.create(
                parse_date(date.as_deref())?,
                description.as_deref().unwrap_or(""),
                parse_category(&category)?,
                parse_amount(&amount)?,
            )?;

            println!("Recorded transaction: {}", txn.id);
            println!("  Date:     {}", txn.date);
            println!("  Category: {}", txn.category);
            println!("  Amount:   {}", txn.amount);
        }

        TransactionCommands::List {
            month,
            category,
            limit,
            all,
        } => {
            let limit = if all {
                None
            } else {
                Some(limit.unwrap_or(settings.list_limit))
            };
            let filter = TransactionFilter {
                month: month.as_deref().map(parse_month).transpose()?,
                category: category.as_deref().map(parse_category).transpose()?,
                limit,
            };

            let transactions = service.list(&filter)?;
            print!("{}", format_transaction_list(&transactions));
        }

        TransactionCommands::Show { id } => {
            let id = resolve_transaction_id(store, &id)?;
            let txn = service.get(id)?;
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Edit {
            id,
            date,
            description,
            category,
            amount,
        } => {
            let id = resolve_transaction_id(store, &id)?;
            let update = TransactionUpdate {
                date: date.as_deref().map(|s| parse_date(Some(s))).transpose()?,
                description,
                category: category.as_deref().map(parse_category).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
            };

            if update.is_empty() {
                println!("No changes specified. Use --date, --description, --category or --amount.");
                return Ok(());
            }

            let updated = service.update(id, update)?;
            println!("Updated transaction: {}", updated.id);
            print!("{}", format_transaction_details(&updated));
        }

        TransactionCommands::Delete { id } => {
            let id = resolve_transaction_id(store, &id)?;
            service.delete(id)?;
            println!("Deleted transaction: {}", id);
        }
    }

    Ok(())
}

/// Resolve a typed transaction ID, accepting full UUIDs or unique short prefixes
fn resolve_transaction_id(store: &UserStore, input: &str) -> SpendlogResult<TransactionId> {
    if let Ok(id) = input.parse::<TransactionId>() {
        if store.transactions.get(id)?.is_some() {
            return Ok(id);
        }
    }

    let needle = input.strip_prefix("txn-").unwrap_or(input).to_lowercase();
    let matches: Vec<TransactionId> = store
        .transactions
        .get_all()?
        .iter()
        .filter(|t| t.id.as_uuid().to_string().starts_with(&needle))
        .map(|t| t.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(SpendlogError::transaction_not_found(input)),
        _ => Err(SpendlogError::Validation(format!(
            "Transaction ID '{}' is ambiguous ({} matches). Use more characters.",
            input,
            matches.len()
        ))),
    }
}
