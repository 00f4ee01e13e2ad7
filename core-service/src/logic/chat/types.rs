//! Chat Types
//!
//! Transcript messages (what the panel shows) and wire messages (what the
//! completion service receives). Kept separate because the transcript
//! stores `text` while the wire format calls it `content`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One transcript entry. Assistant text is markdown; user text is plain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, text: text.into() }
    }
}

/// `{role, content}` pair sent to the completion service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: ChatRole,
    pub content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(m: &ChatMessage) -> Self {
        Self {
            role: m.role,
            content: m.text.clone(),
        }
    }
}

/// Chat completion call failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("Chat API key is not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Chat service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Chat service returned no completion")]
    EmptyResponse,
}
