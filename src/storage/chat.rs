//! Chat history.

use chrono::{DateTime, Utc};
use rusqlite::{params, Transaction};

use super::{ChatTurn, Database, Result};

/// Turns shown in the chat view.
pub const CHAT_HISTORY_LIMIT: usize = 20;

fn insert_turn(
    tx: &Transaction<'_>,
    user_id: i64,
    text: &str,
    is_user_message: bool,
    is_crisis: bool,
    at: DateTime<Utc>,
) -> rusqlite::Result<ChatTurn> {
    tx.execute(
        "INSERT INTO chat_messages (user_id, message_text, is_user_message, timestamp, is_crisis)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, text, is_user_message, at, is_crisis],
    )?;
    Ok(ChatTurn {
        id: tx.last_insert_rowid(),
        user_id,
        message_text: text.to_string(),
        is_user_message,
        timestamp: at,
        is_crisis,
    })
}

impl Database {
    /// Store a user message and the assistant's reply atomically.
    ///
    /// The user turn is never flagged; `reply_is_crisis` applies to the reply
    /// only.
    pub async fn record_exchange(
        &self,
        user_id: i64,
        user_text: &str,
        reply_text: &str,
        reply_is_crisis: bool,
        at: DateTime<Utc>,
    ) -> Result<(ChatTurn, ChatTurn)> {
        let user_text = user_text.to_string();
        let reply_text = reply_text.to_string();

        self.run(move |conn| {
            let tx = conn.transaction()?;
            let user_turn = insert_turn(&tx, user_id, &user_text, true, false, at)?;
            let reply_turn = insert_turn(&tx, user_id, &reply_text, false, reply_is_crisis, at)?;
            tx.commit()?;
            Ok((user_turn, reply_turn))
        })
        .await
    }

    /// The most recent `limit` turns, oldest first.
    pub async fn recent_chat_turns(&self, user_id: i64, limit: usize) -> Result<Vec<ChatTurn>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM chat_messages WHERE user_id = ?1
                 ORDER BY timestamp DESC, id DESC LIMIT ?2",
                ChatTurn::COLUMNS
            ))?;
            let mut turns = stmt
                .query_map(params![user_id, limit as i64], ChatTurn::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            turns.reverse();
            Ok(turns)
        })
        .await
    }

    /// Number of messages the user has sent.
    pub async fn count_user_messages(&self, user_id: i64) -> Result<i64> {
        self.run(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM chat_messages WHERE user_id = ?1 AND is_user_message = 1",
                params![user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
    }
}
