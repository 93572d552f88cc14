//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::clock::SystemClock;
use crate::config::ConfigLoader;
use crate::engine::PayrollEngine;
use crate::error::EngineResult;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// Holds the payroll engine, which owns the store, and the loaded service
/// configuration.
#[derive(Clone)]
pub struct AppState {
    engine: PayrollEngine,
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state from an engine and its configuration.
    pub fn new(engine: PayrollEngine, config: ConfigLoader) -> Self {
        Self {
            engine,
            config: Arc::new(config),
        }
    }

    /// Builds the state the service binary runs with: an in-memory store
    /// populated from the configured seed file and the system clock.
    pub fn from_config(config: ConfigLoader) -> EngineResult<Self> {
        let store = match config.load_seed()? {
            Some(seed) => InMemoryStore::from_seed(seed),
            None => InMemoryStore::new(),
        };
        let engine = PayrollEngine::with_store(Arc::new(store), Arc::new(SystemClock))
            .with_currency_scale(config.config().export.currency_scale);
        Ok(Self::new(engine, config))
    }

    /// Returns the payroll engine.
    pub fn engine(&self) -> &PayrollEngine {
        &self.engine
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}
