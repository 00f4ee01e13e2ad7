//! Stateless prediction and statistics handlers

use std::time::Instant;

use axum::{extract::State, Json};
use validator::Validate;

use phishguard_core::logic::features;

use crate::models::{PredictFeatures, PredictRequest, PredictResponse};
use crate::stats::StatsSnapshot;
use crate::{AppError, AppResult, AppState};

/// Classify one URL without touching any session
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    req.validate()?;
    let url = req.url
        .ok_or_else(|| AppError::ValidationError("No URL provided".to_string()))?;

    let started = Instant::now();
    let verdict = state.classifier.classify(&url).await?;
    state.stats.record(verdict.is_phishing, started.elapsed());

    tracing::info!("Predicted {} for {} ({}%)", verdict.label(), url, verdict.confidence);

    // The prediction API treats any `https` prefix as HTTPS, `://` or not
    let mut lexical = features::extract(&url);
    lexical.https_used = url.starts_with("https");

    Ok(Json(PredictResponse {
        features: PredictFeatures {
            lexical,
            extended: features::extract_extended(&url),
        },
        url,
        is_phishing: verdict.is_phishing,
        confidence: verdict.confidence,
    }))
}

/// Live totals across sessions and predictions
pub async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}
