//! Page navigation handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use phishguard_core::api::SessionSnapshot;
use phishguard_core::logic::router::Page;

use super::find_session;
use crate::models::NavigateRequest;
use crate::{AppError, AppResult, AppState};

/// Switch page
pub async fn navigate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NavigateRequest>,
) -> AppResult<Json<SessionSnapshot>> {
    let page = req.page.parse::<Page>()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let session = find_session(&state, id)?;
    session.navigate(page);
    Ok(Json(session.snapshot()))
}

/// "Scan another URL": back to Home, result kept
pub async fn new_scan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionSnapshot>> {
    let session = find_session(&state, id)?;
    session.new_scan();
    Ok(Json(session.snapshot()))
}
