//! Uniform Catalog HTTP Routes
//!
//! The single resource path `/api/uniforme`, one handler per verb.
//! Bodies are taken as raw bytes so a malformed body reaches the catalog
//! handler and is answered with its JSON envelope instead of an extractor
//! rejection.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::get, Router};

use crate::catalog::{Reply, Uniform, UniformHandler, UniformResult};
use crate::config::{AppConfig, StorageBackend};
use crate::storage::{MemoryTableClient, PostgrestClient, TableClient};

/// Resource path of the uniform endpoint
pub const UNIFORM_PATH: &str = "/api/uniforme";

// ==================
// Shared State
// ==================

/// Catalog state shared across handlers
pub struct CatalogState {
    pub handler: UniformHandler,
}

impl CatalogState {
    pub fn new(handler: UniformHandler) -> Self {
        Self { handler }
    }

    /// Build the table client named by the configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let client: Arc<dyn TableClient> = match &config.storage {
            StorageBackend::Postgrest(pg) => Arc::new(PostgrestClient::new(pg.clone())),
            StorageBackend::Memory => Arc::new(MemoryTableClient::new()),
        };

        let handler = UniformHandler::new(client)
            .with_table(config.table.clone())
            .with_update_mode(config.update_mode);
        Self::new(handler)
    }

    /// State over a fresh in-memory table
    pub fn in_memory() -> Self {
        Self::new(UniformHandler::new(Arc::new(MemoryTableClient::new())))
    }
}

// ==================
// Catalog Routes
// ==================

/// Create catalog routes
pub fn catalog_routes(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route(
            UNIFORM_PATH,
            get(list_handler)
                .post(create_handler)
                .put(update_handler)
                .delete(delete_handler),
        )
        .with_state(state)
}

async fn list_handler(
    State(state): State<Arc<CatalogState>>,
) -> UniformResult<Reply<Vec<Uniform>>> {
    state.handler.list().await
}

async fn create_handler(
    State(state): State<Arc<CatalogState>>,
    body: Bytes,
) -> UniformResult<Reply<Vec<Uniform>>> {
    state.handler.create(&body).await
}

async fn update_handler(
    State(state): State<Arc<CatalogState>>,
    body: Bytes,
) -> UniformResult<Reply<Vec<Uniform>>> {
    state.handler.update(&body).await
}

async fn delete_handler(
    State(state): State<Arc<CatalogState>>,
    body: Bytes,
) -> UniformResult<Reply<()>> {
    state.handler.delete(&body).await
}
