//! AssetScout Infrastructure Library
//!
//! Infrastructure components for AssetScout.
//! This includes the IconScout HTTP transport and a search backend for remote
//! `/api/search` servers.

use assetscout_core::config::UpstreamConfig;
use assetscout_core::Result;

pub mod backend;
pub mod iconscout;

pub use backend::*;
pub use iconscout::*;

/// Infrastructure version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check for infrastructure components
pub fn health_check(config: &UpstreamConfig) -> Result<HealthStatus> {
    let mut status = HealthStatus::new();

    status.endpoint_valid = config.endpoint().is_ok();
    status.upstream_configured = config.client_id.is_some();

    Ok(status)
}

/// Health status for infrastructure components
#[derive(Debug, Clone, Default)]
pub struct HealthStatus {
    pub endpoint_valid: bool,
    pub upstream_configured: bool,
}

impl HealthStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_healthy(&self) -> bool {
        self.endpoint_valid && self.upstream_configured
    }
}
