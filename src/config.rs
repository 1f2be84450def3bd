//! Runtime configuration, read from environment variables.
//!
//! # Environment Variables
//!
//! - `HOST` — bind address (default: `0.0.0.0`)
//! - `PORT` — HTTP port (default: 5000)
//! - `MINDCARE_DB` — SQLite database path (default: `mindcare.db`)
//! - `OPENAI_API_KEY` / `HF_TOKEN` — text generation credential (optional)
//! - `LLM_BASE_URL` — OpenAI-compatible endpoint (default: OpenAI)
//! - `LLM_MODEL` — model name (default: `gpt-3.5-turbo`)
//! - `LLM_TIMEOUT_SECS` — generation time budget per chat message, must be
//!   positive (default: 20)
//! - `LLM_MAX_RETRIES` — HTTP retries inside one attempt (default: 1)

use std::path::PathBuf;
use std::time::Duration;

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";

/// Default generation deadline.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(20);

/// Settings for the text-generation client.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// API key. `None` disables generation; every reply falls back.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Generation time budget for one chat message, retries included.
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout: DEFAULT_LLM_TIMEOUT,
            max_retries: 1,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub llm: LlmSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_path: PathBuf::from("mindcare.db"),
            llm: LlmSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unparseable numbers fall back to
    /// their defaults with a warning; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let api_key = get("OPENAI_API_KEY").or_else(|| get("HF_TOKEN"));

        let llm = LlmSettings {
            api_key,
            base_url: get("LLM_BASE_URL").unwrap_or(defaults.llm.base_url),
            model: get("LLM_MODEL").unwrap_or(defaults.llm.model),
            timeout: Duration::from_secs(parse_nonzero(
                "LLM_TIMEOUT_SECS",
                get("LLM_TIMEOUT_SECS"),
                defaults.llm.timeout.as_secs(),
            )),
            max_retries: parse_or("LLM_MAX_RETRIES", get("LLM_MAX_RETRIES"), defaults.llm.max_retries),
        };

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port),
            database_path: get("MINDCARE_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            llm,
        }
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}, using default", key, value);
            default
        }),
        None => default,
    }
}

fn parse_nonzero(key: &str, raw: Option<String>, default: u64) -> u64 {
    match parse_or(key, raw, default) {
        0 => {
            log::warn!("Ignoring {}=0, using default {}", key, default);
            default
        }
        value => value,
    }
}
