//! # MindCare
//!
//! A mental-health companion service for teenagers and young adults: user
//! accounts, an AI chat companion with crisis-keyword screening, a private
//! journal, and daily mood tracking, served as a JSON API over SQLite.
//!
//! Chat replies go through [`support::ResponseSelector`], which always
//! answers crisis messages with fixed hotline resources, and otherwise tries
//! an OpenAI-compatible model before falling back to canned, topic-matched
//! replies.

pub mod auth;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod storage;
pub mod support;

pub use config::AppConfig;
pub use error::AppError;
pub use llm::{GenerationError, GenerationRequest, OpenAiCompatibleGenerator, TextGenerator};
pub use storage::{Database, StorageError};
pub use support::{ResponseSelector, ResponseSource, SelectedResponse};

/// Crate version reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
