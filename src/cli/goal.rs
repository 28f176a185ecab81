//! Goal CLI commands

use clap::Subcommand;

use crate::display::{format_goal_details, format_goal_list};
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::GoalId;
use crate::services::{GoalService, GoalUpdate};
use crate::storage::UserStore;

use super::{parse_amount, parse_category, parse_month};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Set the goal for a month and category
    Set {
        /// Month (YYYY-MM)
        month: String,
        /// Category name
        category: String,
        /// Target amount (e.g., "400.00")
        target: String,
    },
    /// List goals
    List {
        /// Only goals for this month (YYYY-MM)
        #[arg(short = 'M', long)]
        month: Option<String>,
    },
    /// Show goal details
    Show {
        /// Goal ID (full or short form)
        id: String,
    },
    /// Edit a goal
    Edit {
        /// Goal ID (full or short form)
        id: String,
        /// New month (YYYY-MM)
        #[arg(short = 'M', long)]
        month: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New target amount
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Delete a goal
    Delete {
        /// Goal ID (full or short form)
        id: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(store: &UserStore, cmd: GoalCommands) -> SpendlogResult<()> {
    let service = GoalService::new(store);

    match cmd {
        GoalCommands::Set {
            month,
            category,
            target,
        } => {
            let outcome = service.set(
                parse_month(&month)?,
                parse_category(&category)?,
                parse_amount(&target)?,
            )?;

            if outcome.replaced {
                println!(
                    "Updated goal for {} / {}: {}",
                    outcome.goal.month, outcome.goal.category, outcome.goal.target
                );
            } else {
                println!(
                    "Set goal for {} / {}: {}",
                    outcome.goal.month, outcome.goal.category, outcome.goal.target
                );
            }
            println!("  ID: {}", outcome.goal.id);
        }

        GoalCommands::List { month } => {
            let goals = match month.as_deref() {
                Some(m) => service.list_for_month(parse_month(m)?)?,
                None => service.list()?,
            };
            print!("{}", format_goal_list(&goals));
        }

        GoalCommands::Show { id } => {
            let id = resolve_goal_id(store, &id)?;
            let goal = service.get(id)?;
            print!("{}", format_goal_details(&goal));
        }

        GoalCommands::Edit {
            id,
            month,
            category,
            target,
        } => {
            let id = resolve_goal_id(store, &id)?;
            let update = GoalUpdate {
                month: month.as_deref().map(parse_month).transpose()?,
                category: category.as_deref().map(parse_category).transpose()?,
                target: target.as_deref().map(parse_amount).transpose()?,
            };

            if update.is_empty() {
                println!("No changes specified. Use --month, --category or --target.");
                return Ok(());
            }

            let updated = service.update(id, update)?;
            println!("Updated goal: {}", updated.id);
            print!("{}", format_goal_details(&updated));
        }

        GoalCommands::Delete { id } => {
            let id = resolve_goal_id(store, &id)?;
            service.delete(id)?;
            println!("Deleted goal: {}", id);
        }
    }

    Ok(())
}

/// Resolve a typed goal ID, accepting full UUIDs or unique short prefixes
fn resolve_goal_id(store: &UserStore, input: &str) -> SpendlogResult<GoalId> {
    if let Ok(id) = input.parse::<GoalId>() {
        if store.goals.get(id)?.is_some() {
            return Ok(id);
        }
    }

    let needle = input.strip_prefix("gol-").unwrap_or(input).to_lowercase();
    let matches: Vec<GoalId> = store
        .goals
        .get_all()?
        .iter()
        .filter(|g| g.id.as_uuid().to_string().starts_with(&needle))
        .map(|g| g.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(SpendlogError::goal_not_found(input)),
        _ => Err(SpendlogError::Validation(format!(
            "Goal ID '{}' is ambiguous ({} matches). Use more characters.",
            input,
            matches.len()
        ))),
    }
}
