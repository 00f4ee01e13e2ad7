//! Classifier Types
//!
//! Data structures shared by every classifier. No logic here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{CONFIDENCE_MAX, CONFIDENCE_MIN};

// ============================================================================
// VERDICT
// ============================================================================

/// Binary phishing/safe classification with an integer confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_phishing: bool,
    /// Percentage in `CONFIDENCE_MIN..=CONFIDENCE_MAX`
    pub confidence: u8,
}

impl Verdict {
    /// Build a verdict, clamping confidence into the allowed band
    pub fn new(is_phishing: bool, confidence: u8) -> Self {
        Self {
            is_phishing,
            confidence: confidence.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX),
        }
    }

    /// Build from a float percentage (remote models report e.g. `95.5`)
    pub fn from_percentage(is_phishing: bool, confidence: f64) -> Self {
        let rounded = if confidence.is_finite() {
            confidence.round().clamp(0.0, 100.0) as u8
        } else {
            CONFIDENCE_MIN
        };
        Self::new(is_phishing, rounded)
    }

    pub fn label(&self) -> &'static str {
        if self.is_phishing { "Phishing" } else { "Safe" }
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Which classifier backs the scan controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Coin flip + random confidence
    #[default]
    Mock,
    /// Deterministic feature scoring
    Rules,
    /// External prediction service
    Remote,
}

impl ClassifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKind::Mock => "mock",
            ClassifierKind::Rules => "rules",
            ClassifierKind::Remote => "remote",
        }
    }
}

impl std::str::FromStr for ClassifierKind {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" | "random" => Ok(ClassifierKind::Mock),
            "rules" | "rule" | "rule-based" => Ok(ClassifierKind::Rules),
            "remote" | "model" => Ok(ClassifierKind::Remote),
            other => Err(ClassifierError::UnknownKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid classifier response: {0}")]
    InvalidResponse(String),

    #[error("Unknown classifier kind: {0}")]
    UnknownKind(String),
}
