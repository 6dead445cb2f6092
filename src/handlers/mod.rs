pub mod chat;
pub mod health;
pub mod session;
pub mod webhook;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/webhooks/rest/webhook", post(webhook::rest_webhook))
        .route("/chat", post(chat::chat))
        .route("/reset", post(chat::reset))
        .route("/api/session/:id", get(session::get_session))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
