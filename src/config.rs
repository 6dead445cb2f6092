use std::env;

use crate::services::dialogue::DialogueConfig;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    // None runs the dialogue in-process
    pub runtime_url: Option<String>,
    pub default_year: i32,
    pub hotel_name: String,
    pub conversation_ttl_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "hotel_booking.db".to_string()),
            runtime_url: env::var("RUNTIME_URL").ok().filter(|v| !v.trim().is_empty()),
            default_year: env::var("DEFAULT_YEAR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2025),
            hotel_name: env::var("HOTEL_NAME").unwrap_or_else(|_| "Grand Hotel".to_string()),
            conversation_ttl_minutes: env::var("CONVERSATION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    pub fn dialogue(&self) -> DialogueConfig {
        DialogueConfig {
            default_year: self.default_year,
            hotel_name: self.hotel_name.clone(),
        }
    }
}
