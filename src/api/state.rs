//! Application state for the lesson salary engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::SalaryService;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the loaded configuration and the salary service.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// The service every handler delegates to.
    service: SalaryService,
}

impl AppState {
    /// Creates a state with an in-memory service seeded from `config`.
    pub fn new(config: ConfigLoader) -> Self {
        let service = SalaryService::in_memory(&config);
        Self::with_service(config, service)
    }

    /// Creates a state around an existing service.
    pub fn with_service(config: ConfigLoader, service: SalaryService) -> Self {
        Self {
            config: Arc::new(config),
            service,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the salary service.
    pub fn service(&self) -> &SalaryService {
        &self.service
    }
}
