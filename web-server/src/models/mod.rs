//! Data models

pub mod session;
pub mod predict;

pub use session::*;
pub use predict::*;
