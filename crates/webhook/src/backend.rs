use hookchat_core::{HistoryEntry, NormalizedReply};

use crate::client::WebhookClient;
use crate::error::ChatError;

/// Something that can answer a chat message given the prior conversation.
///
/// [`WebhookClient`] is the production implementation; front ends depend on
/// this trait so they can be exercised without a live webhook.
pub trait ChatBackend: Send + Sync {
    /// Send `message` with `history` (oldest first) and return the reply.
    ///
    /// Resolves exactly once, with either the reply or the error.
    fn send(
        &self,
        message: &str,
        history: &[HistoryEntry],
    ) -> impl std::future::Future<Output = Result<NormalizedReply, ChatError>> + Send;
}

impl ChatBackend for WebhookClient {
    fn send(
        &self,
        message: &str,
        history: &[HistoryEntry],
    ) -> impl std::future::Future<Output = Result<NormalizedReply, ChatError>> + Send {
        WebhookClient::send(self, message, history)
    }
}
