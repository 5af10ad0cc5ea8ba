use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommentApiError {
    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: &'static str },

    /// The request could not be established (connect, TLS, timeout before headers).
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered outside the 2xx range. The body is never read.
    #[error("HTTP {status}")]
    Status { status: StatusCode },

    /// Reading the response body failed after streaming began.
    #[error("stream read failed: {message}")]
    Stream { message: String },
}

impl CommentApiError {
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_stream_failure(&self) -> bool {
        matches!(self, Self::Stream { .. })
    }
}
