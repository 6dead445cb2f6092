use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{BookingSlots, Conversation};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Conversations ──

pub fn get_conversation(conn: &Connection, sender: &str) -> anyhow::Result<Option<Conversation>> {
    let now = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();
    let mut stmt = conn.prepare(
        "SELECT sender, slots, last_activity, expires_at FROM conversations WHERE sender = ?1 AND expires_at > ?2",
    )?;

    let result = stmt.query_row(params![sender, now], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    });

    match result {
        Ok((sender, slots_json, last_activity_str, expires_at_str)) => {
            let slots: BookingSlots = serde_json::from_str(&slots_json).unwrap_or_else(|e| {
                tracing::warn!(sender = %sender, error = %e, "unreadable slot snapshot, starting empty");
                BookingSlots::default()
            });

            let last_activity = NaiveDateTime::parse_from_str(&last_activity_str, TIMESTAMP_FORMAT)
                .unwrap_or_else(|_| Utc::now().naive_utc());
            let expires_at = NaiveDateTime::parse_from_str(&expires_at_str, TIMESTAMP_FORMAT)
                .unwrap_or_else(|_| Utc::now().naive_utc());

            Ok(Some(Conversation {
                sender,
                slots,
                last_activity,
                expires_at,
            }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_conversation(conn: &Connection, conv: &Conversation) -> anyhow::Result<()> {
    let slots_json = serde_json::to_string(&conv.slots)?;
    let last_activity = conv.last_activity.format(TIMESTAMP_FORMAT).to_string();
    let expires_at = conv.expires_at.format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO conversations (sender, slots, last_activity, expires_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(sender) DO UPDATE SET
           slots = excluded.slots,
           last_activity = excluded.last_activity,
           expires_at = excluded.expires_at",
        params![conv.sender, slots_json, last_activity, expires_at],
    )?;
    Ok(())
}

pub fn delete_conversation(conn: &Connection, sender: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM conversations WHERE sender = ?1", params![sender])?;
    Ok(count > 0)
}

pub fn expire_old_conversations(conn: &Connection) -> anyhow::Result<usize> {
    let now = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();
    let count = conn.execute("DELETE FROM conversations WHERE expires_at <= ?1", params![now])?;
    Ok(count)
}
