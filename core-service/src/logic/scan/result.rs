//! Detection Result
//!
//! Created exactly once per completed scan and never mutated afterwards.
//! Shared as `Arc<DetectionResult>`; the `id` gives each result an
//! identity the chat assistant can de-duplicate on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::classifier::Verdict;
use crate::logic::features::FeatureSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub id: Uuid,
    /// Exactly the submitted string, untrimmed
    pub url: String,
    pub is_phishing: bool,
    pub confidence: u8,
    pub features: FeatureSet,
    pub scanned_at: DateTime<Utc>,
}

impl DetectionResult {
    /// Attach features to a verdict. Features are extracted independently
    /// of how the verdict was reached.
    pub fn new(url: &str, verdict: Verdict) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.to_string(),
            is_phishing: verdict.is_phishing,
            confidence: verdict.confidence,
            features: FeatureSet::extract(url),
            scanned_at: Utc::now(),
        }
    }
}
