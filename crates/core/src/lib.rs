pub mod conversation;
pub mod history;
pub mod reply;
pub mod request;

pub use conversation::{ChatMessage, Conversation};
pub use history::{HistoryEntry, Role};
pub use reply::{FileReference, NormalizedReply};
pub use request::ChatRequest;
