//! HTTP routing.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use crate::api;
use crate::assets;
use crate::state::SharedState;

/// Largest accepted upload, matching the biggest photos phones produce.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(assets::index))
        .route("/status", get(api::status))
        .route("/api/print/image", post(api::print_image))
        .route("/api/print/text", post(api::print_text))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
