//! Stateless prediction models

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use phishguard_core::logic::features::{ExtendedFeatures, FeatureSet};

/// Predict request
#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Empty URL"))]
    pub url: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Five core features plus the extended set, flattened
#[derive(Debug, Serialize)]
pub struct PredictFeatures {
    #[serde(flatten)]
    pub lexical: FeatureSet,
    #[serde(flatten)]
    pub extended: ExtendedFeatures,
}

/// Predict response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub url: String,
    pub is_phishing: bool,
    pub confidence: u8,
    pub features: PredictFeatures,
}

/// Liveness reply of the prediction API
#[derive(Debug, Serialize)]
pub struct ApiHealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}
