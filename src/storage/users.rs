//! Accounts and login sessions.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, OptionalExtension};

use super::{Database, Result, StorageError, User};

/// Days a login session stays valid.
pub const SESSION_TTL_DAYS: i64 = 30;

pub fn session_ttl() -> Duration {
    Duration::days(SESSION_TTL_DAYS)
}

impl Database {
    /// Insert a new user. Username and email must both be unused.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<User> {
        let username = username.to_string();
        let email = email.to_string();
        let password_hash = password_hash.to_string();

        self.run(move |conn| {
            let tx = conn.transaction()?;

            let username_taken: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
                params![username],
                |row| row.get(0),
            )?;
            if username_taken {
                return Err(StorageError::UsernameTaken);
            }

            let email_taken: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
                params![email],
                |row| row.get(0),
            )?;
            if email_taken {
                return Err(StorageError::EmailTaken);
            }

            tx.execute(
                "INSERT INTO users (username, email, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![username, email, password_hash, now],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;

            log::info!("Registered user {} (id={})", username, id);
            Ok(User {
                id,
                username,
                email,
                password_hash,
                created_at: now,
            })
        })
        .await
    }

    pub async fn find_user(&self, user_id: i64) -> Result<Option<User>> {
        self.run(move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {} FROM users WHERE id = ?1", User::COLUMNS),
                    params![user_id],
                    User::from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    /// Look a user up by username or email.
    pub async fn find_user_by_login(&self, login: &str) -> Result<Option<User>> {
        let login = login.to_string();
        self.run(move |conn| {
            let user = conn
                .query_row(
                    &format!(
                        "SELECT {} FROM users WHERE username = ?1 OR email = ?1
                         ORDER BY username = ?1 DESC LIMIT 1",
                        User::COLUMNS
                    ),
                    params![login],
                    User::from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    /// Record a session keyed by the digest of its bearer token.
    pub async fn create_session(&self, token_digest: &str, user_id: i64, now: DateTime<Utc>) -> Result<()> {
        let token_digest = token_digest.to_string();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO sessions (token_digest, user_id, created_at) VALUES (?1, ?2, ?3)",
                params![token_digest, user_id, now],
            )?;
            Ok(())
        })
        .await
    }

    /// The user owning the session, if it exists and has not expired by `now`.
    pub async fn find_session_user(&self, token_digest: &str, now: DateTime<Utc>) -> Result<Option<User>> {
        let token_digest = token_digest.to_string();
        let cutoff = now - session_ttl();
        self.run(move |conn| {
            let user = conn
                .query_row(
                    "SELECT u.id, u.username, u.email, u.password_hash, u.created_at
                     FROM sessions s JOIN users u ON u.id = s.user_id
                     WHERE s.token_digest = ?1 AND s.created_at > ?2",
                    params![token_digest, cutoff],
                    User::from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    /// Delete every session older than [`session_ttl`]. Returns how many went.
    pub async fn prune_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize> {
        let cutoff = now - session_ttl();
        self.run(move |conn| {
            let removed = conn.execute("DELETE FROM sessions WHERE created_at <= ?1", params![cutoff])?;
            if removed > 0 {
                log::debug!("Pruned {} expired session(s)", removed);
            }
            Ok(removed)
        })
        .await
    }

    /// Remove a session. Returns whether one existed.
    pub async fn delete_session(&self, token_digest: &str) -> Result<bool> {
        let token_digest = token_digest.to_string();
        self.run(move |conn| {
            let removed = conn.execute(
                "DELETE FROM sessions WHERE token_digest = ?1",
                params![token_digest],
            )?;
            Ok(removed > 0)
        })
        .await
    }
}
