mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use memogenius::config::MemoConfig;

#[derive(Parser)]
#[command(name = "memogenius", version, about = "MemoGenius chat and reminders client")]
struct Cli {
    /// Config file (default: ~/.memogenius/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Exchange a Telegram-issued access key for a session
    Login {
        /// Access key from the MemoGenius bot (MG-XXXX-XXXX)
        access_key: String,
    },
    /// Forget the session and device token
    Logout,
    /// Show the current identity
    Whoami,
    /// Print this install's device token, creating it if needed
    Token,
    /// Chat with the assistant (interactive when no message is given)
    Chat { message: Option<String> },
    /// Manage reminders
    Reminders {
        #[command(subcommand)]
        action: cli::reminders::ReminderAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MemoConfig::load_from(path)?,
        None => MemoConfig::load()?,
    };

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.client.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Login { access_key } => cli::login(&config, &access_key).await,
        Command::Logout => cli::logout(&config),
        Command::Whoami => cli::whoami(&config),
        Command::Token => cli::token(&config),
        Command::Chat { message } => cli::chat::chat(&config, message.as_deref()).await,
        Command::Reminders { action } => cli::reminders::run(&config, action).await,
    }
}
