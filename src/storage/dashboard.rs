//! Per-user dashboard counters.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Database, Result, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Messages the user has sent to the companion.
    pub total_chats: i64,
    pub total_journal_entries: i64,
    /// Score of the newest mood entry.
    pub recent_mood: Option<i64>,
    /// Whole days since registration, counting the first day as 1.
    pub days_active: i64,
}

impl Database {
    pub async fn dashboard_stats(&self, user: &User, now: DateTime<Utc>) -> Result<DashboardStats> {
        let total_chats = self.count_user_messages(user.id).await?;
        let total_journal_entries = self.count_journal_entries(user.id).await?;
        let recent_mood = self.latest_mood_score(user.id).await?;

        Ok(DashboardStats {
            total_chats,
            total_journal_entries,
            recent_mood,
            days_active: days_active(user.created_at, now),
        })
    }
}

fn days_active(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_days().max(0) + 1
}
