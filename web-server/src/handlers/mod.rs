//! HTTP handlers

pub mod health;
pub mod sessions;
pub mod navigation;
pub mod scans;
pub mod chat;
pub mod predict;

use std::sync::Arc;

use uuid::Uuid;

use phishguard_core::api::AppSession;

use crate::{AppError, AppResult, AppState};

/// Resolve a session id or fail with 404
pub(crate) fn find_session(state: &AppState, id: Uuid) -> AppResult<Arc<AppSession>> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))
}
