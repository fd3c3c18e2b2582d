//! Upstream transport for the IconScout search API

use assetscout_core::proxy::{SearchProxy, SharedProxy, UpstreamReply, UpstreamTransport};
use assetscout_core::{config::UpstreamConfig, Result, ScoutError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Upstream client configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// `reqwest` transport used by the production proxy
#[derive(Debug, Clone)]
pub struct IconscoutTransport {
    client: reqwest::Client,
}

impl IconscoutTransport {
    pub fn new(config: TransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamTransport for IconscoutTransport {
    async fn get(&self, url: &Url) -> Result<UpstreamReply> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ScoutError::network(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ScoutError::network(e.without_url().to_string()))?;

        Ok(UpstreamReply {
            status,
            body: body.to_vec(),
        })
    }
}

/// Build the production proxy from the upstream section of the config
pub fn build_proxy(config: &UpstreamConfig) -> Result<SharedProxy> {
    let transport: Arc<dyn UpstreamTransport> = Arc::new(IconscoutTransport::new(TransportConfig {
        timeout: Duration::from_secs(config.timeout_seconds),
    })?);

    Ok(SearchProxy::new(
        transport,
        config.endpoint()?,
        config.client_id.clone(),
    ))
}
