use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, NaiveDate, Utc};
use rusqlite::Connection;

use crate::db::queries;
use crate::models::{BookingSlots, Conversation};
use crate::services::dialogue::BookingDialogue;

pub const RESTART_COMMAND: &str = "/restart";

type Today = Box<dyn Fn() -> NaiveDate + Send + Sync>;

pub struct ConversationHost {
    db: Arc<Mutex<Connection>>,
    dialogue: BookingDialogue,
    ttl_minutes: i64,
    today: Today,
}

impl ConversationHost {
    pub fn new(db: Arc<Mutex<Connection>>, dialogue: BookingDialogue, ttl_minutes: i64) -> Self {
        Self {
            db,
            dialogue,
            ttl_minutes,
            today: Box::new(|| chrono::Local::now().date_naive()),
        }
    }

    pub fn with_today(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    fn lock_db(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    pub fn handle_message(&self, sender: &str, message: &str) -> anyhow::Result<Vec<String>> {
        if message.trim() == RESTART_COMMAND {
            self.reset(sender)?;
            return Ok(vec![]);
        }

        // Held for the whole turn: turns for one sender run one at a time
        let db = self.lock_db()?;

        // Load or create conversation
        let mut conv = queries::get_conversation(&db, sender)?
            .unwrap_or_else(|| self.new_conversation(sender));

        let outcome = self.dialogue.step(&conv.slots, message, (self.today)());

        tracing::info!(
            sender,
            updates = outcome.updates.len(),
            messages = outcome.messages.len(),
            "processed turn"
        );

        conv.slots.apply(&outcome.updates);

        let now = Utc::now().naive_utc();
        conv.last_activity = now;
        conv.expires_at = now + Duration::minutes(self.ttl_minutes);

        queries::save_conversation(&db, &conv)?;

        Ok(outcome.messages)
    }

    pub fn reset(&self, sender: &str) -> anyhow::Result<()> {
        let removed = {
            let db = self.lock_db()?;
            queries::delete_conversation(&db, sender)?
        };
        tracing::info!(sender, removed, "conversation reset");
        Ok(())
    }

    pub fn slots(&self, sender: &str) -> anyhow::Result<Option<BookingSlots>> {
        let db = self.lock_db()?;
        Ok(queries::get_conversation(&db, sender)?.map(|conv| conv.slots))
    }

    pub fn expire_idle(&self) -> anyhow::Result<usize> {
        let db = self.lock_db()?;
        queries::expire_old_conversations(&db)
    }

    fn new_conversation(&self, sender: &str) -> Conversation {
        let now = Utc::now().naive_utc();
        Conversation {
            sender: sender.to_string(),
            slots: BookingSlots::default(),
            last_activity: now,
            expires_at: now + Duration::minutes(self.ttl_minutes),
        }
    }
}
