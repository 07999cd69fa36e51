//! Shared application state.

use std::sync::Arc;

use crate::config::AppConfig;

/// State handed to every handler.
pub struct AppState {
    pub config: AppConfig,
}

/// Cheaply cloneable handle to the application state.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn shared(config: AppConfig) -> SharedState {
        Arc::new(Self { config })
    }
}
