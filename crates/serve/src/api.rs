//! API routes for AssetScout serve crate

use crate::handlers::{handle_health, handle_search, handle_version, AppState};
use axum::{routing::get, Router};

/// API routes configuration
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", get(handle_search))
        .route("/health", get(handle_health))
        .route("/version", get(handle_version))
}
