use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use spendlog::cli::{
    handle_budget_command, handle_goal_command, handle_report_command, handle_transaction_command,
    handle_user_command, BudgetCommands, GoalCommands, ReportCommands, TransactionCommands,
    UserCommands,
};
use spendlog::config::{paths::SpendlogPaths, settings::Settings};
use spendlog::services::UserService;
use spendlog::storage::{Storage, UserStore};

#[derive(Parser)]
#[command(
    name = "spendlog",
    version,
    about = "Multi-user expense tracker for the terminal",
    long_about = "spendlog is a terminal expense tracker. Each registered user \
                  records dated transactions, sets monthly per-category spending \
                  goals, and checks whether actual spending is under or over \
                  those goals."
)]
struct Cli {
    /// Act as this user (email) for transaction, goal, budget and report commands
    #[arg(short, long, env = "SPENDLOG_USER", global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "tx")]
    Transaction(TransactionCommands),

    /// Goal management commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Budget status commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = SpendlogPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths)?;

    // Persist defaults on first run so config.json exists for hand-editing
    if !storage.paths().is_initialized() {
        settings.save(storage.paths())?;
    }

    match cli.command {
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            let store = open_user_store(&storage, cli.user.as_deref())?;
            handle_transaction_command(&store, &settings, cmd)?;
        }
        Some(Commands::Goal(cmd)) => {
            let store = open_user_store(&storage, cli.user.as_deref())?;
            handle_goal_command(&store, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            let store = open_user_store(&storage, cli.user.as_deref())?;
            handle_budget_command(&store, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let store = open_user_store(&storage, cli.user.as_deref())?;
            handle_report_command(&store, cmd)?;
        }
        Some(Commands::Config) => {
            println!("spendlog Configuration");
            println!("======================");
            println!("Base directory: {}", storage.paths().base_dir().display());
            println!("Data directory: {}", storage.paths().data_dir().display());
            println!();
            println!("Settings:");
            println!("  List limit: {}", settings.list_limit);
        }
        None => {
            println!("spendlog - Multi-user expense tracker");
            println!();
            println!("Run 'spendlog --help' for usage information.");
            println!("Run 'spendlog user register <email>' to get started.");
        }
    }

    Ok(())
}

/// Resolve the acting user and open their record store
fn open_user_store(storage: &Storage, user: Option<&str>) -> Result<UserStore> {
    let Some(email) = user else {
        bail!("No user selected. Pass --user <email> or set SPENDLOG_USER.");
    };

    let service = UserService::new(storage);
    let user = service.require_by_email(email)?;
    Ok(storage.open_user(user.id)?)
}
