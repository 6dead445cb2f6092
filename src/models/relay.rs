use serde::{Deserialize, Serialize};

// ── Runtime webhook wire format ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub sender: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BotMessage {
    #[serde(default)]
    pub recipient_id: String,
    #[serde(default)]
    pub text: String,
}

// ── Relay responses ──

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Text,
    RoomOptions,
    BookingConfirmation,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayReply {
    pub response: String,
    pub sender: String,
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_data: Option<BookingData>,
}

impl RelayReply {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            sender: "bot".to_string(),
            kind: ResponseKind::Text,
            booking_data: None,
        }
    }
}
