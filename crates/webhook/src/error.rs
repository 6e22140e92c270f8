use std::error::Error as _;

use thiserror::Error;

/// Errors returned by a webhook call.
///
/// Every variant renders as a single displayable message; match on the
/// variant (or [`ChatError::kind`]) to branch programmatically. None of them
/// are retried.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The client is not configured well enough to attempt a call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never produced an HTTP response (network, DNS, TLS,
    /// timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The webhook answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },
}

/// Coarse classification of a [`ChatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Server,
}

impl ChatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Server { .. } => ErrorKind::Server,
        }
    }

    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a server error from the extracted detail and optional auth
    /// diagnostics.
    pub(crate) fn server(status: u16, detail: &str, auth_debug: Option<&str>) -> Self {
        let mut message = format!("webhook returned HTTP {status}");
        let detail = detail.trim();
        if !detail.is_empty() {
            message.push_str(": ");
            message.push_str(detail);
        }
        if let Some(auth) = auth_debug {
            message.push_str(" [auth headers: ");
            message.push_str(auth);
            message.push(']');
        }
        Self::Server { status, message }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Transport(message)
    }
}
