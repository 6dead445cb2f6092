use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::models::BookingSlots;
use crate::state::AppState;

// GET /api/session/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookingSlots>, AppError> {
    state
        .conversations
        .slots(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))
}
