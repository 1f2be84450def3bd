//! Daily mood tracking. A user has at most one entry per UTC calendar day.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::{Database, MoodEntry, MoodReading, MoodWrite, Result};

/// Entries shown in the mood view.
pub const MOOD_HISTORY_LIMIT: usize = 30;

impl Database {
    /// Save today's reading, replacing today's entry if there already is one.
    /// A replaced entry keeps its id and original `created_at`.
    pub async fn upsert_daily_mood(
        &self,
        user_id: i64,
        reading: MoodReading,
        now: DateTime<Utc>,
    ) -> Result<(MoodEntry, MoodWrite)> {
        let day = now.date_naive().format("%Y-%m-%d").to_string();

        self.run(move |conn| {
            let tx = conn.transaction()?;

            let existing: Option<(i64, DateTime<Utc>)> = tx
                .query_row(
                    "SELECT id, created_at FROM mood_entries
                     WHERE user_id = ?1 AND substr(created_at, 1, 10) = ?2
                     ORDER BY id DESC LIMIT 1",
                    params![user_id, day],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            let (id, created_at, write) = match existing {
                Some((id, created_at)) => {
                    tx.execute(
                        "UPDATE mood_entries
                         SET mood_score = ?1, energy_level = ?2, anxiety_level = ?3,
                             sleep_hours = ?4, notes = ?5
                         WHERE id = ?6",
                        params![
                            reading.mood_score,
                            reading.energy_level,
                            reading.anxiety_level,
                            reading.sleep_hours,
                            reading.notes,
                            id
                        ],
                    )?;
                    (id, created_at, MoodWrite::Updated)
                }
                None => {
                    tx.execute(
                        "INSERT INTO mood_entries
                         (user_id, mood_score, energy_level, anxiety_level, sleep_hours, notes, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                        params![
                            user_id,
                            reading.mood_score,
                            reading.energy_level,
                            reading.anxiety_level,
                            reading.sleep_hours,
                            reading.notes,
                            now
                        ],
                    )?;
                    (tx.last_insert_rowid(), now, MoodWrite::Created)
                }
            };
            tx.commit()?;

            Ok((
                MoodEntry {
                    id,
                    user_id,
                    mood_score: reading.mood_score,
                    energy_level: reading.energy_level,
                    anxiety_level: reading.anxiety_level,
                    sleep_hours: reading.sleep_hours,
                    notes: reading.notes,
                    created_at,
                },
                write,
            ))
        })
        .await
    }

    /// The most recent `limit` entries, newest first.
    pub async fn recent_mood_entries(&self, user_id: i64, limit: usize) -> Result<Vec<MoodEntry>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM mood_entries WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT ?2",
                MoodEntry::COLUMNS
            ))?;
            let entries = stmt
                .query_map(params![user_id, limit as i64], MoodEntry::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
        .await
    }

    pub async fn latest_mood_score(&self, user_id: i64) -> Result<Option<i64>> {
        self.run(move |conn| {
            let score = conn
                .query_row(
                    "SELECT mood_score FROM mood_entries WHERE user_id = ?1
                     ORDER BY created_at DESC, id DESC LIMIT 1",
                    params![user_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(score)
        })
        .await
    }
}
