use clap::Args;
use hookchat_core::ChatMessage;
use hookchat_webhook::WebhookClient;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Message to send. The call carries no prior history.
    pub message: String,
}

pub async fn run(
    client: &WebhookClient,
    args: &SendArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let message = args.message.trim();
    if message.is_empty() {
        anyhow::bail!("please enter a message");
    }

    let reply = client.send(message, &[]).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        OutputFormat::Text => {
            super::print_message(&ChatMessage::from(reply), format)?;
        }
    }

    Ok(())
}
