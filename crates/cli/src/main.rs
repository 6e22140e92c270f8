//! hookchat CLI
//!
//! A terminal chat front end that forwards messages to an automation-workflow
//! webhook and prints the normalized replies.

mod commands;
mod config;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hookchat_webhook::{AuthMode, WebhookClient};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{ChatConfig, Overrides};

/// Chat with an automation-workflow webhook from the terminal.
#[derive(Parser, Debug)]
#[command(name = "hookchat", version, about)]
struct Cli {
    /// Path to the TOML config file (defaults to ./hookchat.toml if present).
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Webhook URL.
    #[arg(long, env = "HOOKCHAT_WEBHOOK_URL", global = true)]
    url: Option<String>,

    /// Auth mode: none, bearer, authorization-raw, x-api-key, or custom.
    #[arg(long, env = "HOOKCHAT_AUTH_MODE", global = true)]
    auth_mode: Option<AuthMode>,

    /// Token used by the bearer, authorization-raw, and x-api-key modes.
    #[arg(long, env = "HOOKCHAT_AUTH_TOKEN", hide_env_values = true, global = true)]
    auth_token: Option<String>,

    /// Include resolved auth header values in server error messages.
    #[arg(long, global = true)]
    debug_auth_errors: bool,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start an interactive chat session.
    Chat(commands::chat::ChatArgs),
    /// Send a single message and print the reply.
    Send(commands::send::SendArgs),
    /// Show the auth headers that would be attached to requests.
    Headers(commands::headers::HeadersArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose && std::env::var_os("RUST_LOG").is_none() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ChatConfig::load(cli.config.as_deref())?;
    config.apply(Overrides {
        url: cli.url.clone(),
        auth_mode: cli.auth_mode,
        auth_token: cli.auth_token.clone(),
        debug_auth_errors: cli.debug_auth_errors,
    });

    let client = WebhookClient::new(config.webhook_config())?;
    tracing::debug!(config = ?client.config(), "webhook client ready");

    match cli.command {
        Command::Chat(args) => {
            commands::chat::run(client, config.greeting(), &args, &cli.format).await
        }
        Command::Send(args) => commands::send::run(&client, &args, &cli.format).await,
        Command::Headers(args) => commands::headers::run(&client, &args, &cli.format),
    }
}
