//! Application state: the record store handle shared by every request.
//!
//! There is no other in-process mutable state. Each request goes straight to
//! the store, which owns atomicity of single-record writes.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::{StoreBackend, StoreConfig};
use crate::store::{MemoryStore, MongoStore, ProblemStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProblemStore>,
}

impl AppState {
    pub fn with_store(store: Arc<dyn ProblemStore>) -> Self {
        Self { store }
    }

    /// Fresh in-memory state (tests, and the default when nothing is configured).
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Build state from the store section of the config.
    #[instrument(level = "info", skip_all, fields(backend = ?cfg.backend))]
    pub async fn from_config(cfg: &StoreConfig) -> Result<Self, StoreError> {
        let state = match cfg.backend {
            StoreBackend::Memory => Self::in_memory(),
            StoreBackend::Mongo => Self::with_store(Arc::new(MongoStore::connect(cfg).await?)),
        };
        info!(target: "tracker", store = state.store.backend(), "Record store ready");
        Ok(state)
    }
}
