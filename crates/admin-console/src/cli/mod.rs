// crates/admin-console/src/cli/mod.rs
// CLI definition for the admin console

use clap::{Parser, Subcommand};

pub mod auth;
pub mod users;

pub use auth::{run_dashboard, run_login, run_logout, run_whoami};
pub use users::{run_roles, run_users};

#[derive(Parser)]
#[command(name = "admin-console")]
#[command(about = "Manage user accounts and roles on the admin API")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        /// Account name (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "ADMIN_CONSOLE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Log in again even if a token is already stored
        #[arg(long)]
        force: bool,
    },

    /// Forget the stored session
    Logout,

    /// Show the stored identity and roles
    Whoami,

    /// Show the role-scoped dashboard
    Dashboard,

    /// List roles (Admin only)
    Roles,

    /// Manage user accounts (Admin only)
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List all users
    List,

    /// Show one user
    Get {
        #[arg(index = 1)]
        id: i64,
    },

    /// Create a user
    Create {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        /// Role name; repeat for several roles
        #[arg(short, long = "role", required = true)]
        roles: Vec<String>,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Change fields of an existing user
    Update {
        #[arg(index = 1)]
        id: i64,

        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Replace the user's roles; repeat for several roles
        #[arg(short, long = "role")]
        roles: Vec<String>,

        /// Prompt for a new password
        #[arg(long)]
        reset_password: bool,
    },

    /// Delete a user
    Delete {
        #[arg(index = 1)]
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Print a value as pretty JSON
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
