//! Search API proxy
//!
//! Adapts the upstream asset-search API to one stable envelope:
//!
//! 1. validate the inbound [`SearchParams`],
//! 2. build the upstream query ([`UpstreamQuery::build`]),
//! 3. append the server-held [`ClientId`],
//! 4. issue exactly one upstream call through an [`UpstreamTransport`],
//! 5. reshape the reply into `response.items` ([`UpstreamResponse`]).
//!
//! Every failure is returned as a [`SearchEnvelope::error`]; nothing escapes
//! [`SearchProxy::handle`] as an `Err`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use assetscout_core::proxy::{SearchParams, SearchProxy, UpstreamTransport};
//!
//! # async fn example<T: UpstreamTransport>(proxy: SearchProxy<T>) {
//! let params = SearchParams {
//!     query: Some("arrow".to_string()),
//!     asset_type: Some("icons".to_string()),
//!     ..Default::default()
//! };
//! let envelope = proxy.handle(&params).await;
//! assert!(!envelope.is_error());
//! # }
//! ```

mod envelope;
mod params;

pub use envelope::{
    EnvelopeStatus, ItemsPage, Numeric, ResponseBody, SearchEnvelope, UpstreamResponse,
};
pub use params::{SearchParams, SearchRequest, UpstreamQuery};

use crate::{Result, ScoutError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};
use url::Url;

/// Upstream API credential. Never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientId(***)")
    }
}

/// Raw upstream reply
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the single upstream HTTP GET
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    /// Fetch `url`. Transport failures are `ScoutError::Network`; any HTTP
    /// status, successful or not, is a reply.
    async fn get(&self, url: &Url) -> Result<UpstreamReply>;
}

#[async_trait]
impl<T: UpstreamTransport + ?Sized> UpstreamTransport for Arc<T> {
    async fn get(&self, url: &Url) -> Result<UpstreamReply> {
        (**self).get(url).await
    }
}

/// Proxy over a type-erased transport, as shared by the server and the CLI
pub type SharedProxy = SearchProxy<Arc<dyn UpstreamTransport>>;

/// Stateless request handler in front of the upstream search API
#[derive(Debug, Clone)]
pub struct SearchProxy<T> {
    transport: T,
    endpoint: Url,
    client_id: Option<ClientId>,
}

impl<T: UpstreamTransport> SearchProxy<T> {
    pub fn new(transport: T, endpoint: Url, client_id: Option<ClientId>) -> Self {
        Self {
            transport,
            endpoint,
            client_id,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn is_configured(&self) -> bool {
        self.client_id.is_some()
    }

    /// Handle one `/api/search` request
    pub async fn handle(&self, params: &SearchParams) -> SearchEnvelope {
        match self.try_handle(params).await {
            Ok(envelope) => envelope,
            Err(e) => {
                match &e {
                    ScoutError::Validation { .. } => {}
                    ScoutError::Config { .. } => error!("Upstream client id is not configured"),
                    other => error!(
                        category = %other.category(),
                        "Error fetching from upstream search API: {}", other
                    ),
                }
                SearchEnvelope::error(e.to_string())
            }
        }
    }

    async fn try_handle(&self, params: &SearchParams) -> Result<SearchEnvelope> {
        let query = UpstreamQuery::build(params)?;

        let client_id = self
            .client_id
            .as_ref()
            .ok_or_else(|| ScoutError::config("Client ID not configured"))?;

        let public_url = query.to_url(&self.endpoint);
        info!(client_id_configured = true, "Making request to upstream search API: {}", public_url);

        let mut url = public_url;
        url.query_pairs_mut()
            .append_pair("client_id", client_id.expose());

        let reply = self.transport.get(&url).await?;
        if !reply.is_success() {
            return Err(ScoutError::upstream(reply.status));
        }

        let response = UpstreamResponse::from_slice(query.view(), &reply.body)?;
        Ok(response.into_envelope())
    }
}
