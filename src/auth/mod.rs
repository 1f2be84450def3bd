//! Authentication: password hashing, bearer session tokens, and the
//! [`AuthUser`] extractor that guards every personal route.
//!
//! Tokens are opaque random strings handed to the client once at login. Only
//! their SHA-256 digest is stored, so a leaked database cannot be replayed as
//! live sessions.

pub mod password;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::AppError;
use crate::storage::{Database, User};

pub use password::{hash_password, verify_password};

/// Shown whenever a personal route is hit without a valid session.
pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";

/// A freshly minted session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// Returned to the client; never stored.
    pub token: String,
    /// Stored server-side.
    pub digest: String,
}

impl SessionToken {
    pub fn generate() -> Self {
        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let digest = token_digest(&token);
        Self { token, digest }
    }
}

/// Hex SHA-256 of a bearer token.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// The logged-in user for this request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    /// Digest of the presented token, used by logout.
    pub token_digest: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_bearer)
            .ok_or_else(|| AppError::unauthorized(LOGIN_REQUIRED))?;

        let digest = token_digest(token);
        let db = Database::from_ref(state);
        let user = db
            .find_session_user(&digest, Utc::now())
            .await?
            .ok_or_else(|| AppError::unauthorized(LOGIN_REQUIRED))?;

        Ok(AuthUser {
            user,
            token_digest: digest,
        })
    }
}
