//! Shared state for the log collection server.

use std::sync::Arc;
use std::time::Instant;

use claw_applog::{LogStoreBackend, PartitionedLogStore};

use crate::config::ServerConfig;

/// Shared state handed to every request handler.
///
/// Holds no mutable data: every request resolves partition paths on its own
/// and all log state lives on disk.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// Backing log store.
    store: Arc<dyn LogStoreBackend>,
    /// Server start time.
    start_time: Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create state backed by a partitioned store rooted at the configured
    /// directory.
    pub fn new(config: ServerConfig) -> Self {
        let store = PartitionedLogStore::new(config.store.clone());
        Self::with_store(config, Arc::new(store))
    }

    /// Create state backed by an arbitrary store.
    pub fn with_store(config: ServerConfig, store: Arc<dyn LogStoreBackend>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            start_time: Instant::now(),
        }
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get a handle to the store.
    pub fn store(&self) -> Arc<dyn LogStoreBackend> {
        Arc::clone(&self.store)
    }

    /// Get server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
