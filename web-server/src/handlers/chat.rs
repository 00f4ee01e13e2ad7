//! Chat panel handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use phishguard_core::api::SessionSnapshot;

use super::find_session;
use crate::models::{DraftRequest, SendMessageRequest};
use crate::{AppResult, AppState};

/// Open/close the panel
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionSnapshot>> {
    let session = find_session(&state, id)?;
    session.toggle_chat();
    Ok(Json(session.snapshot()))
}

/// Replace the input draft
pub async fn set_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DraftRequest>,
) -> AppResult<Json<SessionSnapshot>> {
    let session = find_session(&state, id)?;
    session.set_chat_draft(req.text);
    Ok(Json(session.snapshot()))
}

/// Send a follow-up message and wait for the reply. Blank messages and
/// messages while the assistant is busy are ignored.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> AppResult<Json<SessionSnapshot>> {
    req.validate()?;
    let session = find_session(&state, id)?;

    if let Err(rejection) = session.send_chat_message(req.text.as_deref()).await {
        tracing::debug!("Chat message ignored for session {}: {}", id, rejection);
    }
    Ok(Json(session.snapshot()))
}
