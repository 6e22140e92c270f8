use serde::{Deserialize, Serialize};

use crate::history::{HistoryEntry, Role};
use crate::reply::{FileReference, NormalizedReply};

/// A message as shown in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub files: Vec<FileReference>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            files: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            files: Vec::new(),
        }
    }
}

impl From<NormalizedReply> for ChatMessage {
    fn from(reply: NormalizedReply) -> Self {
        Self {
            role: Role::Assistant,
            content: reply.reply,
            files: reply.files,
        }
    }
}

/// In-memory transcript of one chat session, oldest message first.
///
/// Nothing is persisted; the transcript lives as long as the value.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a conversation with an assistant greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(greeting)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Append the user's message before the webhook has answered.
    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::user(content))
    }

    /// Append the assistant's normalized reply, files included.
    pub fn push_reply(&mut self, reply: NormalizedReply) -> &ChatMessage {
        self.push(reply.into())
    }

    /// Append a failed call as an assistant entry.
    pub fn push_error(&mut self, error: impl std::fmt::Display) -> &ChatMessage {
        self.push(ChatMessage::assistant(format!("Request failed: {error}")))
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Project the transcript onto the history sent with the next call.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .map(|m| HistoryEntry::new(m.role, m.content.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_is_first_message() {
        let conversation = Conversation::with_greeting("hello there");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::Assistant);
        assert_eq!(conversation.messages()[0].content, "hello there");
    }

    #[test]
    fn history_includes_greeting_and_pending_user_message() {
        let mut conversation = Conversation::with_greeting("welcome");
        conversation.push_user("question");

        let history = conversation.history();
        assert_eq!(
            history,
            vec![
                HistoryEntry::assistant("welcome"),
                HistoryEntry::user("question"),
            ]
        );
    }

    #[test]
    fn reply_keeps_files_but_history_drops_them() {
        let mut conversation = Conversation::new();
        conversation.push_user("q");
        conversation.push_reply(NormalizedReply::text("a").with_files(vec![FileReference {
            name: "Reference file 1".into(),
            source: "http://x".into(),
            snippet: "c".into(),
        }]));

        let last = conversation.last().unwrap();
        assert_eq!(last.files.len(), 1);
        assert_eq!(conversation.history()[1], HistoryEntry::assistant("a"));
    }

    #[test]
    fn error_becomes_assistant_entry() {
        let mut conversation = Conversation::new();
        conversation.push_user("q");
        conversation.push_error("webhook returned HTTP 500");

        let last = conversation.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "Request failed: webhook returned HTTP 500");
        assert!(last.files.is_empty());
    }

    #[test]
    fn empty_conversation() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
        assert!(conversation.history().is_empty());
        assert!(conversation.last().is_none());
    }
}
