use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::RelayReply;
use crate::services::relay::{new_session_id, relay_message, restart_session};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    #[serde(flatten)]
    pub reply: RelayReply,
    pub session_id: String,
}

fn existing_session(id: Option<String>) -> Option<String> {
    id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

// POST /chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let session_id = existing_session(payload.session_id).unwrap_or_else(|| {
        let id = new_session_id();
        tracing::info!(session = %id, "issued new session");
        id
    });

    let reply = relay_message(state.runtime.as_ref(), &session_id, &payload.message).await;
    tracing::debug!(session = %session_id, kind = ?reply.kind, "relay reply");

    Json(ChatResponse { reply, session_id })
}

#[derive(Deserialize, Default)]
pub struct ResetRequest {
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub session_id: String,
}

// POST /reset
pub async fn reset(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<ResetRequest>>,
) -> Json<ResetResponse> {
    let old_id = payload.and_then(|Json(p)| existing_session(p.session_id));
    let new_id = new_session_id();

    if let Some(old_id) = &old_id {
        restart_session(state.runtime.as_ref(), old_id).await;
    }
    restart_session(state.runtime.as_ref(), &new_id).await;

    tracing::info!(
        old_session = old_id.as_deref().unwrap_or("unknown"),
        new_session = %new_id,
        "conversation reset"
    );

    Json(ResetResponse {
        status: "success",
        message: "Conversation reset",
        session_id: new_id,
    })
}
