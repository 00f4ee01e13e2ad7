//! Session lifecycle handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use phishguard_core::api::SessionSnapshot;

use super::find_session;
use crate::{AppError, AppResult, AppState};

/// Create a new session
pub async fn create(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let session = state.sessions.create();
    tracing::info!("Session started: {}", session.id());
    (StatusCode::CREATED, Json(session.snapshot()))
}

/// Get session state
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionSnapshot>> {
    let session = find_session(&state, id)?;
    Ok(Json(session.snapshot()))
}

/// Drop a session
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !state.sessions.remove(id) {
        return Err(AppError::NotFound("Session not found".to_string()));
    }
    tracing::info!("Session ended: {}", id);
    Ok(StatusCode::NO_CONTENT)
}
