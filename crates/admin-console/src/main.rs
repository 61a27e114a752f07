// crates/admin-console/src/main.rs
// Admin console - command-line client for the user/role administration API

mod cli;

use admin_console::config::{ConsoleConfig, state_dir};
use admin_console::{AdminConsole, ConsoleError};
use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing::{Level, warn};
use tracing_subscriber::FmtSubscriber;

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Operator-facing text for a failed command
fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ConsoleError>() {
        Some(ConsoleError::Validation(errors)) => {
            let lines: Vec<String> = errors
                .iter()
                .map(|(field, msg)| format!("  {}: {}", field, msg))
                .collect();
            format!("Please fix the following:\n{}", lines.join("\n"))
        }
        Some(console_err) => console_err.to_user_string(),
        None => err.to_string(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ConsoleConfig::from_env();
    let validation = config.validate();
    for warning in validation.warnings() {
        warn!("{}", warning);
    }

    let console = AdminConsole::bootstrap(&config).await?;
    let json = cli.json;

    match cli.command {
        Commands::Login {
            username,
            password,
            force,
        } => cli::run_login(&console, username, password, force, json).await,
        Commands::Logout => cli::run_logout(&console).await,
        Commands::Whoami => cli::run_whoami(&console, json).await,
        Commands::Dashboard => cli::run_dashboard(&console, json).await,
        Commands::Roles => cli::run_roles(&console, json).await,
        Commands::Users { action } => cli::run_users(&console, action, json).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    let _ = dotenvy::from_path(state_dir().join(".env"));
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", user_message(&err));
        std::process::exit(1);
    }

    Ok(())
}
