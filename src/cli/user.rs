//! User CLI commands

use clap::Subcommand;

use crate::error::SpendlogResult;
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Register {
        /// Email address
        email: String,
        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Verify a user's credentials
    Login {
        /// Email address
        email: String,
        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List registered users
    List,
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> SpendlogResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Register { email, password } => {
            let password = read_password(password)?;
            let user = service.register(&email, &password)?;

            println!("Registered user: {}", user.email);
            println!("  ID: {}", user.id);
        }

        UserCommands::Login { email, password } => {
            let password = read_password(password)?;
            let user = service.verify(&email, &password)?;

            println!("Credentials OK for {}", user.email);
        }

        UserCommands::List => {
            let users = service.list()?;
            if users.is_empty() {
                println!("No users registered.");
            } else {
                println!("{:<12} {:<32} {}", "Id", "Email", "Registered");
                println!("{}", "-".repeat(60));
                for user in users {
                    println!(
                        "{:<12} {:<32} {}",
                        user.id.to_string(),
                        user.email,
                        user.created_at.format("%Y-%m-%d")
                    );
                }
            }
        }
    }

    Ok(())
}

/// Use the given password or prompt for one without echoing
fn read_password(password: Option<String>) -> SpendlogResult<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}
