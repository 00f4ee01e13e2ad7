//! Scan Module
//!
//! Scan lifecycle: claim slot → simulated latency → classify → store result.

pub mod result;
pub mod controller;

pub use result::DetectionResult;
pub use controller::{ScanController, ScanError, ScanOutcome, ScanRejection, ScanStatus, ScanTicket};
