//! Journal entries.

use chrono::{DateTime, Utc};
use rusqlite::params;

use super::{Database, JournalEntry, NewJournalEntry, Result};

impl Database {
    pub async fn add_journal_entry(
        &self,
        user_id: i64,
        entry: NewJournalEntry,
        now: DateTime<Utc>,
    ) -> Result<JournalEntry> {
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO journal_entries (user_id, title, content, mood_rating, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![user_id, entry.title, entry.content, entry.mood_rating, now],
            )?;
            Ok(JournalEntry {
                id: conn.last_insert_rowid(),
                user_id,
                title: entry.title,
                content: entry.content,
                mood_rating: entry.mood_rating,
                created_at: now,
            })
        })
        .await
    }

    /// All of a user's entries, newest first.
    pub async fn journal_entries(&self, user_id: i64) -> Result<Vec<JournalEntry>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM journal_entries WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC",
                JournalEntry::COLUMNS
            ))?;
            let entries = stmt
                .query_map(params![user_id], JournalEntry::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
        .await
    }

    pub async fn count_journal_entries(&self, user_id: i64) -> Result<i64> {
        self.run(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM journal_entries WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
    }
}
