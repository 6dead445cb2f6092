use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{BotMessage, WebhookRequest};
use crate::state::AppState;

pub async fn rest_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WebhookRequest>,
) -> Result<Json<Vec<BotMessage>>, AppError> {
    let sender = payload.sender.trim();
    if sender.is_empty() {
        return Err(AppError::BadRequest("sender is required".to_string()));
    }

    tracing::info!(sender, text = %payload.message, "incoming message");

    let messages = state
        .conversations
        .handle_message(sender, &payload.message)?;

    Ok(Json(
        messages
            .into_iter()
            .map(|text| BotMessage {
                recipient_id: sender.to_string(),
                text,
            })
            .collect(),
    ))
}
