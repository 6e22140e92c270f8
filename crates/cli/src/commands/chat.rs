use std::io::Write;

use clap::Args;
use hookchat_webhook::WebhookClient;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::OutputFormat;
use crate::session::{ChatSession, SessionError};

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Start without the greeting message.
    #[arg(long)]
    pub no_greeting: bool,
}

const QUIT_COMMANDS: &[&str] = &["/quit", "/exit"];

pub async fn run(
    client: WebhookClient,
    greeting: Option<&str>,
    args: &ChatArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let greeting = if args.no_greeting { None } else { greeting };
    let mut session = ChatSession::new(client, greeting);
    if let Some(message) = session.conversation().last() {
        super::print_message(message, format)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if matches!(format, OutputFormat::Text) {
            print!("> ");
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if QUIT_COMMANDS.contains(&line.trim()) {
            break;
        }

        match session.send(&line).await {
            Ok(message) => super::print_message(message, format)?,
            Err(e @ SessionError::EmptyMessage) => eprintln!("{e}"),
        }
    }

    Ok(())
}
