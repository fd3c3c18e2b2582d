//! Search backend that talks to a running `/api/search` endpoint

use assetscout_core::proxy::{SearchEnvelope, SearchParams, SearchRequest};
use assetscout_core::{Result, ScoutError, SearchBackend};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Calls `{base_url}/api/search` over HTTP
#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    client: reqwest::Client,
    search_url: Url,
}

impl HttpSearchBackend {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let search_url = base_url.join("/api/search")?;
        Ok(Self { client, search_url })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchEnvelope> {
        debug!("Requesting {} page {}", self.search_url, request.page);

        let response = self
            .client
            .get(self.search_url.clone())
            .header(ACCEPT, "application/json")
            .query(&SearchParams::from(request))
            .send()
            .await
            .map_err(|e| ScoutError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScoutError::upstream(response.status().as_u16()));
        }

        response
            .json::<SearchEnvelope>()
            .await
            .map_err(|e| ScoutError::malformed(e.to_string()))
    }
}
