use clap::Args;
use hookchat_webhook::WebhookClient;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct HeadersArgs {
    /// Print header values unmasked.
    #[arg(long)]
    pub reveal: bool,
}

pub fn run(
    client: &WebhookClient,
    args: &HeadersArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let resolver = client.resolver();
    let headers: Vec<(String, String)> = resolver
        .resolve()
        .into_iter()
        .map(|(k, v)| {
            let v = if args.reveal { v } else { mask(&v) };
            (k, v)
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "configured": client.config().is_configured(),
                "auth_mode": resolver.effective_mode(),
                "headers": headers
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect::<serde_json::Map<_, _>>(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            let url = if client.config().is_configured() {
                client.config().url.as_str()
            } else {
                "(not configured)"
            };
            println!("webhook:   {url}");
            println!("auth mode: {}", resolver.effective_mode());
            if headers.is_empty() {
                println!("headers:   none");
            } else {
                println!("headers:");
                for (k, v) in &headers {
                    println!("  {k}: {v}");
                }
            }
        }
    }
    Ok(())
}

/// Keep a short prefix of long values so operators can tell them apart.
fn mask(value: &str) -> String {
    if value.chars().count() <= 8 {
        return "****".into();
    }
    let prefix: String = value.chars().take(4).collect();
    format!("{prefix}****")
}
