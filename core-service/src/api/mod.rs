//! API Module
//!
//! Entry points for the presentation layer.
//!
//! Structure:
//! - session.rs: `AppSession`, the per-browser-session store

pub mod session;

pub use session::{AppSession, SessionConfig, SessionSnapshot};
