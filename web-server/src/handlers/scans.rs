//! Scan handlers

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use phishguard_core::api::SessionSnapshot;
use phishguard_core::logic::scan::ScanOutcome;

use super::find_session;
use crate::models::ScanRequest;
use crate::{AppResult, AppState};

/// Start a scan. The snapshot returned shows `scanning: true`; the scan
/// finishes in the background and the client polls the session.
/// Blank URLs and scans while another is running leave state unchanged.
pub async fn start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ScanRequest>,
) -> AppResult<(StatusCode, Json<SessionSnapshot>)> {
    let session = find_session(&state, id)?;

    let ticket = match session.begin_scan(&req.url) {
        Ok(ticket) => ticket,
        Err(rejection) => {
            tracing::debug!("Scan ignored for session {}: {}", id, rejection);
            return Ok((StatusCode::OK, Json(session.snapshot())));
        }
    };

    let snapshot = session.snapshot();
    let stats = state.stats.clone();
    let started_at = Utc::now();

    tokio::spawn(async move {
        match session.finish_scan(ticket).await {
            ScanOutcome::Completed(result) => {
                let elapsed = (result.scanned_at - started_at)
                    .to_std()
                    .unwrap_or(Duration::ZERO);
                stats.record(result.is_phishing, elapsed);
            }
            ScanOutcome::Failed(e) => {
                tracing::warn!("Scan failed for session {}: {}", session.id(), e);
            }
            ScanOutcome::Rejected(_) => {}
        }
    });

    Ok((StatusCode::ACCEPTED, Json(snapshot)))
}
