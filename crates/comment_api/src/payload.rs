use serde::{Deserialize, Serialize};

/// Request payload for the comment endpoint: a single field holding the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRequest {
    pub code: String,
}

impl CommentRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// True when the code is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }
}
