//! Chat Module
//!
//! Completion client plus the conversation state machine that narrates
//! detection results and answers follow-up questions.

pub mod assistant;
pub mod client;
pub mod prompt;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use assistant::{ChatAssistant, ChatPhase, ChatRejection, ChatSnapshot, TurnOutcome};
pub use client::{ChatClient, ChatConfig, GroqChatClient};
pub use prompt::build_explanation_prompt;
pub use types::{ChatMessage, ChatRole, UpstreamError, WireMessage};
