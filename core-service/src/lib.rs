//! PhishGuard Core
//!
//! URL feature extraction, classification, scan lifecycle, page routing and
//! the chat assistant that narrates detection results.

pub mod api;
pub mod constants;
pub mod logic;
