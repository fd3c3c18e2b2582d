//! HTTP handlers for AssetScout serve crate

use assetscout_core::config::UpstreamConfig;
use assetscout_core::proxy::{SearchEnvelope, SearchParams};
use assetscout_core::Result;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;

pub use assetscout_core::proxy::SharedProxy;

/// API version
pub const API_VERSION: &str = "v2";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<SharedProxy>,
}

impl AppState {
    pub fn new(proxy: SharedProxy) -> Self {
        Self {
            proxy: Arc::new(proxy),
        }
    }

    /// Create application state talking to the configured upstream
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self::new(assetscout_infra::build_proxy(config)?))
    }
}

/// Handler for `GET /api/search`
///
/// Always answers 200; failures are reported inside the envelope.
pub async fn handle_search(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Json<SearchEnvelope> {
    match params {
        Ok(Query(params)) => Json(state.proxy.handle(&params).await),
        Err(rejection) => {
            tracing::warn!("Rejected search query string: {}", rejection.body_text());
            Json(SearchEnvelope::error(rejection.body_text()))
        }
    }
}

/// Health check endpoint
pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now(),
        upstream_configured: state.proxy.is_configured(),
    })
}

/// Get version information
pub async fn handle_version() -> impl IntoResponse {
    Json(VersionResponse {
        name: "assetscout".to_string(),
        version: crate::VERSION.to_string(),
        api_version: API_VERSION.to_string(),
    })
}

// Response types

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub upstream_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: String,
    pub version: String,
    pub api_version: String,
}
