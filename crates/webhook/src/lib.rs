//! Webhook client for the hookchat chat front end.
//!
//! Forwards a user message plus the conversation history to an automation
//! workflow webhook, attaching header-based authentication, and normalizes
//! the loosely-structured reply into a [`NormalizedReply`].
//!
//! # Quick start
//!
//! ```rust,no_run
//! use hookchat_webhook::{AuthMode, WebhookClient, WebhookConfig};
//!
//! # async fn example() -> Result<(), hookchat_webhook::ChatError> {
//! let config = WebhookConfig::new("https://automation.example.com/webhook/chat")
//!     .with_auth_mode(AuthMode::Bearer)
//!     .with_auth_token("token-123");
//! let client = WebhookClient::new(config)?;
//!
//! let reply = client.send("hello", &[]).await?;
//! println!("{}", reply.reply);
//! # Ok(())
//! # }
//! ```
//!
//! [`NormalizedReply`]: hookchat_core::NormalizedReply

pub mod auth;
pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;

pub use auth::{AuthHeaderResolver, AuthHeaders};
pub use backend::ChatBackend;
pub use client::{OutboundRequest, WebhookClient};
pub use config::{AuthMode, CustomAuthHeaders, DEFAULT_TIMEOUT, WebhookConfig};
pub use error::{ChatError, ErrorKind};
pub use normalize::{FALLBACK_REPLY, clarify_error_detail, extract_error_detail, normalize_reply};
