use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use crate::models::{BookingData, BotMessage, RelayReply, ResponseKind, WebhookRequest};
use crate::services::conversation::{ConversationHost, RESTART_COMMAND};

const MESSAGE_TIMEOUT: Duration = Duration::from_secs(10);
const RESTART_TIMEOUT: Duration = Duration::from_secs(5);

pub const NOT_UNDERSTOOD: &str = "Sorry, I did not understand.";
pub const RUNTIME_UNAVAILABLE: &str = "Sorry, there was an issue connecting to the chatbot.";

#[async_trait]
pub trait RuntimeClient: Send + Sync {
    async fn send(&self, sender: &str, message: &str) -> anyhow::Result<Vec<String>>;
}

pub struct LocalRuntime {
    host: Arc<ConversationHost>,
}

impl LocalRuntime {
    pub fn new(host: Arc<ConversationHost>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl RuntimeClient for LocalRuntime {
    async fn send(&self, sender: &str, message: &str) -> anyhow::Result<Vec<String>> {
        self.host.handle_message(sender, message)
    }
}

// Rasa-compatible REST webhook
pub struct HttpRuntime {
    url: String,
    client: reqwest::Client,
}

impl HttpRuntime {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RuntimeClient for HttpRuntime {
    async fn send(&self, sender: &str, message: &str) -> anyhow::Result<Vec<String>> {
        let timeout = if message == RESTART_COMMAND {
            RESTART_TIMEOUT
        } else {
            MESSAGE_TIMEOUT
        };

        let body = WebhookRequest {
            sender: sender.to_string(),
            message: message.to_string(),
        };

        let replies: Vec<BotMessage> = self
            .client
            .post(&self.url)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .context("failed to call conversation runtime")?
            .error_for_status()
            .context("conversation runtime returned error")?
            .json()
            .await
            .context("failed to parse conversation runtime response")?;

        Ok(replies.into_iter().map(|m| m.text).collect())
    }
}

pub fn new_session_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("user_{}", &id[..8])
}

pub async fn relay_message(runtime: &dyn RuntimeClient, session_id: &str, message: &str) -> RelayReply {
    tracing::info!(session = session_id, text = message, "relaying message");

    match runtime.send(session_id, message).await {
        Ok(messages) => classify(&messages),
        Err(e) => {
            tracing::error!(session = session_id, error = %e, "conversation runtime failed");
            RelayReply::text(RUNTIME_UNAVAILABLE)
        }
    }
}

pub async fn restart_session(runtime: &dyn RuntimeClient, session_id: &str) {
    match runtime.send(session_id, RESTART_COMMAND).await {
        Ok(_) => tracing::info!(session = session_id, "conversation restarted"),
        Err(e) => tracing::warn!(session = session_id, error = %e, "failed to restart conversation"),
    }
}

fn is_booking_confirmation(text: &str) -> bool {
    text.contains("Booking ID:") && text.contains("Guest:")
}

fn has_room_options(text: &str) -> bool {
    text.contains("Standard Room") || text.contains("Deluxe Room")
}

pub fn classify(messages: &[String]) -> RelayReply {
    let Some(first) = messages.first() else {
        return RelayReply::text(NOT_UNDERSTOOD);
    };

    let combined = messages.join("\n");

    if let Some(confirmation) = messages.iter().find(|m| is_booking_confirmation(m)) {
        tracing::debug!("booking confirmation detected");
        return RelayReply {
            response: combined,
            sender: "bot".to_string(),
            kind: ResponseKind::BookingConfirmation,
            booking_data: Some(parse_booking_details(confirmation)),
        };
    }

    if messages.iter().any(|m| has_room_options(m)) {
        return RelayReply {
            response: combined,
            sender: "bot".to_string(),
            kind: ResponseKind::RoomOptions,
            booking_data: None,
        };
    }

    RelayReply::text(first.clone())
}

fn value_after<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.find(label).map(|idx| line[idx + label.len()..].trim())
}

pub fn parse_booking_details(message: &str) -> BookingData {
    let mut data = BookingData::default();

    for line in message.lines().map(str::trim) {
        if let Some(v) = value_after(line, "Booking ID:") {
            data.booking_id = Some(v.to_string());
        } else if let Some(v) = value_after(line, "Guest:") {
            data.guest_name = Some(v.to_string());
        } else if let Some(v) = value_after(line, "Room:") {
            data.room_type = Some(v.to_string());
        } else if let Some(v) = value_after(line, "Check-in:") {
            data.checkin_date = Some(v.to_string());
        } else if let Some(v) = value_after(line, "Check-out:") {
            data.checkout_date = Some(v.to_string());
        } else if let Some(v) = value_after(line, "Nights:") {
            data.nights = Some(v.to_string());
        } else if let Some(v) = value_after(line, "Guests:") {
            data.guests = Some(v.to_string());
        }
    }

    data
}
