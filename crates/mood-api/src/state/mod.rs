//! Application state shared by all handlers

use std::sync::Arc;

use mood_common::AppConfig;
use mood_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    /// Repositories, fallback store and rate limiter
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("env", &self.config.app.env)
            .finish()
    }
}
