//! HTTP server for the MindCare companion.
//!
//! See [`routes`] for the endpoint list.

pub mod routes;
pub mod state;

use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::llm::OpenAiCompatibleGenerator;
use crate::storage::Database;
use crate::support::ResponseSelector;

pub use routes::app_router;
pub use state::AppState;

/// Wire storage and the response selector into [`AppState`].
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let db = Database::open(&config.database_path)
        .with_context(|| format!("opening database at {}", config.database_path.display()))?;

    let generator = OpenAiCompatibleGenerator::new(&config.llm).context("building LLM client")?;
    if !generator.has_credential() {
        tracing::warn!(
            "No OPENAI_API_KEY or HF_TOKEN set; chat replies will use fallback responses"
        );
    }
    tracing::info!(
        model = %config.llm.model,
        base_url = %config.llm.base_url,
        "Text generation configured"
    );

    let selector = ResponseSelector::new(Arc::new(generator)).with_timeout(config.llm.timeout);
    Ok(AppState::new(db, selector))
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&config)?;
    let app = app_router(state);

    let bind_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    tracing::info!("MindCare server v{} listening on {}", crate::VERSION, bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
