//! Row types.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub(crate) const COLUMNS: &'static str = "id, username, email, password_hash, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

/// One message in a conversation, from the user or the assistant.
///
/// `is_crisis` is only ever set on assistant turns that carry the crisis
/// resources text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatTurn {
    pub id: i64,
    pub user_id: i64,
    pub message_text: String,
    pub is_user_message: bool,
    pub timestamp: DateTime<Utc>,
    pub is_crisis: bool,
}

impl ChatTurn {
    pub(crate) const COLUMNS: &'static str =
        "id, user_id, message_text, is_user_message, timestamp, is_crisis";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            message_text: row.get(2)?,
            is_user_message: row.get(3)?,
            timestamp: row.get(4)?,
            is_crisis: row.get(5)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    /// 1-10.
    pub mood_rating: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub(crate) const COLUMNS: &'static str = "id, user_id, title, content, mood_rating, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            mood_rating: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

/// Validated input for a new journal entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: String,
    pub mood_rating: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodEntry {
    pub id: i64,
    pub user_id: i64,
    /// 1-10.
    pub mood_score: i64,
    pub energy_level: Option<i64>,
    pub anxiety_level: Option<i64>,
    pub sleep_hours: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    pub(crate) const COLUMNS: &'static str =
        "id, user_id, mood_score, energy_level, anxiety_level, sleep_hours, notes, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            mood_score: row.get(2)?,
            energy_level: row.get(3)?,
            anxiety_level: row.get(4)?,
            sleep_hours: row.get(5)?,
            notes: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}

/// Validated daily mood metrics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoodReading {
    pub mood_score: i64,
    pub energy_level: Option<i64>,
    pub anxiety_level: Option<i64>,
    pub sleep_hours: Option<f64>,
    pub notes: Option<String>,
}

/// Whether a daily mood write created today's entry or replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodWrite {
    Created,
    Updated,
}
