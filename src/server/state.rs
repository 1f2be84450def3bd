//! Shared application state for the HTTP server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::storage::Database;
use crate::support::ResponseSelector;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Database,
    pub selector: Arc<ResponseSelector>,
}

impl AppState {
    pub fn new(db: Database, selector: ResponseSelector) -> Self {
        Self {
            db,
            selector: Arc::new(selector),
        }
    }
}
