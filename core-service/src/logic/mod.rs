//! Logic Module - Detection & Conversation Engines
//!
//! ## Structure
//! - `features/` - URL feature extraction (lexical + extended)
//! - `classifier/` - Verdicts (mock, rule-based, remote model)
//! - `scan/` - Scan lifecycle and detection results
//! - `router` - Page state machine
//! - `explain/` - Per-feature insights for the Results view
//! - `chat/` - Completion client + assistant state machine

pub mod features;
pub mod classifier;
pub mod scan;
pub mod router;
pub mod explain;
pub mod chat;
