//! MindCare HTTP server binary.
//!
//! # Environment Variables
//!
//! - `HOST` / `PORT` — bind address (default: `0.0.0.0:5000`)
//! - `MINDCARE_DB` — SQLite file (default: `mindcare.db`)
//! - `OPENAI_API_KEY` or `HF_TOKEN` — generation credential; without one every
//!   non-crisis reply comes from the fallback table
//! - `LLM_BASE_URL`, `LLM_MODEL`, `LLM_TIMEOUT_SECS`, `LLM_MAX_RETRIES`
//! - `RUST_LOG` — tracing filter (default: `info,mindcare=debug`)
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use mindcare::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mindcare=debug".into()),
        )
        .init();

    let config = AppConfig::from_env();
    mindcare::server::serve(config).await
}
