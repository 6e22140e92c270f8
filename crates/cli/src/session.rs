use hookchat_core::{ChatMessage, Conversation};
use hookchat_webhook::ChatBackend;
use thiserror::Error;
use tracing::warn;

/// Input the session refuses to send.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("please enter a message")]
    EmptyMessage,
}

/// One interactive chat: the transcript plus the backend answering it.
///
/// `send` takes `&mut self`, so a session can never have two requests in
/// flight.
pub struct ChatSession<B> {
    backend: B,
    conversation: Conversation,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: B, greeting: Option<&str>) -> Self {
        let conversation = match greeting {
            Some(greeting) => Conversation::with_greeting(greeting),
            None => Conversation::new(),
        };
        Self {
            backend,
            conversation,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Send one line of user input and return the assistant's entry.
    ///
    /// The user message is appended before the call. A failed call is
    /// recorded as an assistant message rather than returned as an error.
    pub async fn send(&mut self, input: &str) -> Result<&ChatMessage, SessionError> {
        let message = input.trim();
        if message.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        self.conversation.push_user(message);
        let history = self.conversation.history();

        match self.backend.send(message, &history).await {
            Ok(reply) => Ok(self.conversation.push_reply(reply)),
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "chat request failed");
                Ok(self.conversation.push_error(e))
            }
        }
    }
}
