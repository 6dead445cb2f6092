use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use tower::ServiceExt;

use hotel_booking::config::AppConfig;
use hotel_booking::db;
use hotel_booking::handlers;
use hotel_booking::services::conversation::ConversationHost;
use hotel_booking::services::dialogue::BookingDialogue;
use hotel_booking::services::relay::{LocalRuntime, RuntimeClient};
use hotel_booking::state::AppState;

// ── Mock Runtimes ──

struct RecordingRuntime {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    replies: Vec<String>,
}

#[async_trait]
impl RuntimeClient for RecordingRuntime {
    async fn send(&self, sender: &str, message: &str) -> anyhow::Result<Vec<String>> {
        self.sent
            .lock()
            .unwrap()
            .push((sender.to_string(), message.to_string()));
        Ok(self.replies.clone())
    }
}

struct DownRuntime;

#[async_trait]
impl RuntimeClient for DownRuntime {
    async fn send(&self, _sender: &str, _message: &str) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("connection refused")
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        runtime_url: None,
        default_year: 2025,
        hotel_name: "Grand Hotel".to_string(),
        conversation_ttl_minutes: 30,
    }
}

fn test_host(config: &AppConfig) -> Arc<ConversationHost> {
    let conn = db::init_db(":memory:").unwrap();
    Arc::new(
        ConversationHost::new(
            Arc::new(Mutex::new(conn)),
            BookingDialogue::new(config.dialogue()),
            config.conversation_ttl_minutes,
        )
        .with_today(|| NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()),
    )
}

fn test_state() -> Arc<AppState> {
    let config = test_config();
    let conversations = test_host(&config);
    Arc::new(AppState {
        runtime: Box::new(LocalRuntime::new(Arc::clone(&conversations))),
        conversations,
    })
}

fn test_state_with_runtime(runtime: impl RuntimeClient + 'static) -> Arc<AppState> {
    let config = test_config();
    let conversations = test_host(&config);
    Arc::new(AppState {
        conversations,
        runtime: Box::new(runtime),
    })
}

fn test_app(state: Arc<AppState>) -> Router {
    handlers::router(state)
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send_json(state: &Arc<AppState>, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let res = test_app(state.clone()).oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn webhook(state: &Arc<AppState>, sender: &str, message: &str) -> Vec<String> {
    let (status, json) = send_json(
        state,
        json_post(
            "/webhooks/rest/webhook",
            serde_json::json!({ "sender": sender, "message": message }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json.as_array()
        .unwrap()
        .iter()
        .map(|m| {
            assert_eq!(m["recipient_id"], sender);
            m["text"].as_str().unwrap().to_string()
        })
        .collect()
}

async fn chat(state: &Arc<AppState>, session_id: Option<&str>, message: &str) -> serde_json::Value {
    let (status, json) = send_json(
        state,
        json_post(
            "/chat",
            serde_json::json!({ "session_id": session_id, "message": message }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let state = test_state();
    let res = test_app(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

// ── Runtime webhook ──

#[tokio::test]
async fn test_webhook_full_booking() {
    let state = test_state();

    let replies = webhook(&state, "user_e2e", "hello").await;
    assert_eq!(replies, vec!["What's your name for the booking?".to_string()]);

    let replies = webhook(&state, "user_e2e", "Bob").await;
    assert!(replies[0].contains("check in"));

    let replies = webhook(&state, "user_e2e", "20/9/2025").await;
    assert_eq!(
        replies,
        vec!["Check-in: September 20, 2025. When would you like to check out?".to_string()]
    );

    let replies = webhook(&state, "user_e2e", "23/9/2025").await;
    assert!(replies[0].contains("(3 nights)"));

    webhook(&state, "user_e2e", "2 guests").await;
    let replies = webhook(&state, "user_e2e", "standard").await;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0], "Excellent choice! You've selected the Standard Room.");
    let summary = &replies[1];
    assert!(summary.contains("Guest: Bob"));
    assert!(summary.contains("Room: Standard Room"));
    assert!(summary.contains("Nights: 3"));
    assert!(summary.contains("Guests: 2"));

    let id_line = regex::Regex::new(r"(?m)^Booking ID: GH\d{4}$").unwrap();
    assert!(id_line.is_match(summary));
}

#[tokio::test]
async fn test_webhook_repeats_summary_once_complete() {
    let state = test_state();
    for input in ["Bob", "20/9/2025", "23/9/2025", "2", "suite"] {
        webhook(&state, "user_done", input).await;
    }

    let replies = webhook(&state, "user_done", "what did I book?").await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].contains("Room: Suite"));
    assert!(replies[0].contains("Guest: Bob"));
}

#[tokio::test]
async fn test_webhook_checkout_before_checkin() {
    let state = test_state();
    webhook(&state, "user_dates", "Alice").await;
    webhook(&state, "user_dates", "sep 20").await;

    let replies = webhook(&state, "user_dates", "18/9/2025").await;
    assert_eq!(
        replies,
        vec!["Check-out must be after check-in (September 20, 2025). Please try again.".to_string()]
    );

    let slots = state.conversations.slots("user_dates").unwrap().unwrap();
    assert_eq!(slots.checkin_date.as_deref(), Some("2025-09-20"));
    assert_eq!(slots.checkout_date, None);
}

#[tokio::test]
async fn test_webhook_restart_command() {
    let state = test_state();
    webhook(&state, "user_r", "Alice").await;

    let replies = webhook(&state, "user_r", "/restart").await;
    assert!(replies.is_empty());
    assert!(state.conversations.slots("user_r").unwrap().is_none());
}

#[tokio::test]
async fn test_webhook_requires_sender() {
    let state = test_state();
    let (status, json) = send_json(
        &state,
        json_post(
            "/webhooks/rest/webhook",
            serde_json::json!({ "sender": "  ", "message": "hi" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("sender"));
}

// ── Relay ──

#[tokio::test]
async fn test_chat_issues_session_and_books() {
    let state = test_state();

    let first = chat(&state, None, "Carol").await;
    assert_eq!(first["type"], "text");
    assert_eq!(first["sender"], "bot");
    let session = first["session_id"].as_str().unwrap().to_string();
    assert!(session.starts_with("user_"));

    chat(&state, Some(&session), "september 20").await;

    let checkout = chat(&state, Some(&session), "22 sep").await;
    assert_eq!(checkout["type"], "room_options");

    let guests = chat(&state, Some(&session), "just 1").await;
    assert_eq!(guests["type"], "room_options");

    let done = chat(&state, Some(&session), "I'd like the family room please").await;
    assert_eq!(done["type"], "booking_confirmation");
    assert_eq!(done["session_id"], session.as_str());
    assert!(done["response"]
        .as_str()
        .unwrap()
        .starts_with("Excellent choice! You've selected the Family Room.\n"));

    let data = &done["booking_data"];
    assert_eq!(data["guest_name"], "Carol");
    assert_eq!(data["room_type"], "Family Room");
    assert_eq!(data["checkin_date"], "September 20, 2025");
    assert_eq!(data["checkout_date"], "September 22, 2025");
    assert_eq!(data["nights"], "2");
    assert_eq!(data["guests"], "1");
    assert!(data["booking_id"].as_str().unwrap().starts_with("GH"));
}

#[tokio::test]
async fn test_chat_runtime_down() {
    let state = test_state_with_runtime(DownRuntime);
    let reply = chat(&state, Some("user_x"), "hello").await;
    assert_eq!(reply["type"], "text");
    assert_eq!(
        reply["response"],
        "Sorry, there was an issue connecting to the chatbot."
    );
}

#[tokio::test]
async fn test_chat_forwards_to_runtime() {
    let sent = Arc::new(Mutex::new(vec![]));
    let state = test_state_with_runtime(RecordingRuntime {
        sent: Arc::clone(&sent),
        replies: vec!["first".to_string(), "second".to_string()],
    });

    let reply = chat(&state, Some("user_fwd"), "hi there").await;
    assert_eq!(reply["response"], "first");
    assert_eq!(
        *sent.lock().unwrap(),
        vec![("user_fwd".to_string(), "hi there".to_string())]
    );
}

#[tokio::test]
async fn test_reset_restarts_old_and_new_sessions() {
    let sent = Arc::new(Mutex::new(vec![]));
    let state = test_state_with_runtime(RecordingRuntime {
        sent: Arc::clone(&sent),
        replies: vec![],
    });

    let (status, json) = send_json(
        &state,
        json_post("/reset", serde_json::json!({ "session_id": "user_old" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    let new_id = json["session_id"].as_str().unwrap().to_string();
    assert_ne!(new_id, "user_old");

    let sent = sent.lock().unwrap();
    assert_eq!(
        *sent,
        vec![
            ("user_old".to_string(), "/restart".to_string()),
            (new_id, "/restart".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_reset_clears_local_conversation() {
    let state = test_state();
    let first = chat(&state, None, "Dave").await;
    let session = first["session_id"].as_str().unwrap().to_string();
    assert!(state.conversations.slots(&session).unwrap().is_some());

    let (status, _) = send_json(
        &state,
        json_post("/reset", serde_json::json!({ "session_id": session })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.conversations.slots(&session).unwrap().is_none());
}

// ── Session inspection ──

#[tokio::test]
async fn test_get_session() {
    let state = test_state();
    webhook(&state, "user_s", "Erin").await;

    let (status, json) = send_json(
        &state,
        Request::builder()
            .uri("/api/session/user_s")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["guest_name"], "Erin");
    assert_eq!(json["checkin_date"], serde_json::Value::Null);

    let (status, _) = send_json(
        &state,
        Request::builder()
            .uri("/api/session/user_missing")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
