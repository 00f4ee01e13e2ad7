//! Chat Assistant
//!
//! Conversation state machine behind the chat panel:
//!
//! ```text
//!   idle/ready --notify(new result)--> explaining --reply--> ready
//!   idle/ready --send_user_message--> awaiting-reply --reply--> ready
//! ```
//!
//! At most one completion call owns the busy flag. Every call carries a
//! sequence number; a reply whose number is no longer current is dropped.
//! An auto-explanation for a new result supersedes whatever is in flight.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::client::ChatClient;
use super::prompt::build_explanation_prompt;
use super::types::{ChatMessage, ChatRole, UpstreamError, WireMessage};
use crate::logic::scan::DetectionResult;

/// Shown when the explanation call fails
pub const EXPLANATION_FAILED: &str =
    "⚠️ Sorry, I couldn't generate an explanation for this result right now. Please try again later.";

/// Shown when a follow-up reply fails
pub const REPLY_FAILED: &str =
    "⚠️ Sorry, I couldn't generate a reply right now. Please try again.";

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatPhase {
    #[default]
    Idle,
    Explaining,
    AwaitingReply,
    Ready,
}

/// Message rejected before any request was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChatRejection {
    #[error("Message is empty")]
    EmptyInput,
    #[error("Assistant is busy")]
    Busy,
}

/// What happened to a request once it resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Reply (or error bubble) written to the transcript
    Applied,
    /// A newer request took over; reply discarded
    Superseded,
}

/// Read-only view of the chat panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSnapshot {
    pub is_open: bool,
    pub transcript: Vec<ChatMessage>,
    pub is_busy: bool,
    pub draft: String,
    pub phase: ChatPhase,
}

#[derive(Debug, Default)]
struct ChatState {
    is_open: bool,
    transcript: Vec<ChatMessage>,
    is_busy: bool,
    draft: String,
    phase: ChatPhase,
    last_explained: Option<Uuid>,
    request_seq: u64,
}

impl ChatState {
    /// Claim the busy flag for a new request
    fn start(&mut self, phase: ChatPhase) -> u64 {
        self.request_seq += 1;
        self.is_busy = true;
        self.phase = phase;
        self.request_seq
    }
}

/// Owns the busy flag for one request. Dropping it unresolved (the
/// caller's future was cancelled) releases the flag if still current.
struct PendingTurn {
    state: Arc<Mutex<ChatState>>,
    seq: u64,
    settled: bool,
}

impl PendingTurn {
    fn new(state: Arc<Mutex<ChatState>>, seq: u64) -> Self {
        Self { state, seq, settled: false }
    }

    fn settle(mut self, apply: impl FnOnce(&mut ChatState)) -> TurnOutcome {
        self.settled = true;
        let mut state = self.state.lock();
        if state.request_seq != self.seq {
            log::debug!("Dropping stale chat reply (seq {} < {})", self.seq, state.request_seq);
            return TurnOutcome::Superseded;
        }
        apply(&mut state);
        state.is_busy = false;
        state.phase = ChatPhase::Ready;
        TurnOutcome::Applied
    }
}

impl Drop for PendingTurn {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.state.lock();
        if state.request_seq == self.seq {
            log::warn!("Chat request {} abandoned; releasing busy flag", self.seq);
            state.is_busy = false;
            state.phase = ChatPhase::Ready;
        }
    }
}

// ============================================================================
// ASSISTANT
// ============================================================================

pub struct ChatAssistant {
    client: Arc<dyn ChatClient>,
    state: Arc<Mutex<ChatState>>,
}

impl ChatAssistant {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(ChatState::default())),
        }
    }

    /// Auto-explain a new result. Fires once per result id; returns `None`
    /// when the result was already explained.
    pub async fn notify(&self, result: Arc<DetectionResult>) -> Option<TurnOutcome> {
        let turn = {
            let mut state = self.state.lock();
            if state.last_explained == Some(result.id) {
                return None;
            }
            state.last_explained = Some(result.id);
            state.is_open = true;
            let seq = state.start(ChatPhase::Explaining);
            PendingTurn::new(self.state.clone(), seq)
        };

        log::info!("Explaining result {} for {}", result.id, result.url);

        // Prior transcript is not sent with an explanation
        let messages = [WireMessage {
            role: ChatRole::User,
            content: build_explanation_prompt(&result),
        }];
        let text = self.reply_text(&messages, EXPLANATION_FAILED).await;

        Some(turn.settle(|state| {
            state.transcript = vec![ChatMessage::assistant(text)];
        }))
    }

    /// Free-form follow-up. Blank input and input while busy are rejected
    /// without touching state.
    pub async fn send_user_message(&self, text: &str) -> Result<TurnOutcome, ChatRejection> {
        if text.trim().is_empty() {
            return Err(ChatRejection::EmptyInput);
        }

        let (turn, messages) = {
            let mut state = self.state.lock();
            if state.is_busy {
                return Err(ChatRejection::Busy);
            }
            state.transcript.push(ChatMessage::user(text));
            state.draft.clear();
            let seq = state.start(ChatPhase::AwaitingReply);
            let messages: Vec<WireMessage> =
                state.transcript.iter().map(WireMessage::from).collect();
            (PendingTurn::new(self.state.clone(), seq), messages)
        };

        let reply = self.reply_text(&messages, REPLY_FAILED).await;

        Ok(turn.settle(|state| {
            state.transcript.push(ChatMessage::assistant(reply));
        }))
    }

    async fn reply_text(&self, messages: &[WireMessage], fallback: &str) -> String {
        match self.client.complete(messages).await {
            Ok(text) => text,
            Err(e) => {
                log_upstream_error(&e);
                fallback.to_string()
            }
        }
    }

    /// Open/close the panel. In-flight requests are unaffected.
    pub fn toggle_open(&self) -> bool {
        let mut state = self.state.lock();
        state.is_open = !state.is_open;
        state.is_open
    }

    pub fn set_draft(&self, draft: impl Into<String>) {
        self.state.lock().draft = draft.into();
    }

    pub fn draft(&self) -> String {
        self.state.lock().draft.clone()
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        let state = self.state.lock();
        ChatSnapshot {
            is_open: state.is_open,
            transcript: state.transcript.clone(),
            is_busy: state.is_busy,
            draft: state.draft.clone(),
            phase: state.phase,
        }
    }
}

fn log_upstream_error(e: &UpstreamError) {
    match e {
        UpstreamError::NotConfigured => log::warn!("Chat unavailable: {}", e),
        _ => log::error!("Chat completion failed: {}", e),
    }
}
