use serde::{Deserialize, Serialize};

/// A file or document the webhook cited alongside its reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    /// Display label.
    pub name: String,

    /// URL or path of the file. May be empty.
    pub source: String,

    /// Excerpt of the cited content. May be empty.
    pub snippet: String,
}

/// The fixed reply shape every webhook response is normalized into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedReply {
    pub reply: String,

    #[serde(default)]
    pub files: Vec<FileReference>,
}

impl NormalizedReply {
    /// Create a reply without file references.
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            files: Vec::new(),
        }
    }

    /// Attach file references.
    #[must_use]
    pub fn with_files(mut self, files: Vec<FileReference>) -> Self {
        self.files = files;
        self
    }
}
