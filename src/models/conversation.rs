use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::BookingSlots;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub sender: String,
    pub slots: BookingSlots,
    pub last_activity: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}
