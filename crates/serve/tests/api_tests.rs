//! Integration tests for the HTTP surface
//!
//! The upstream API is replaced by an in-memory transport so the tests can
//! inspect exactly what would have been sent.

use assetscout_core::proxy::{SearchProxy, UpstreamReply, UpstreamTransport};
use assetscout_core::{ClientId, Result, ScoutError};
use assetscout_serve::{create_app, AppState, ServerConfig};
use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use url::Url;

#[derive(Default)]
struct RecordingTransport {
    reply: Mutex<Option<Result<UpstreamReply>>>,
    requests: Mutex<Vec<Url>>,
}

impl RecordingTransport {
    fn replying(status: u16, body: Value) -> Arc<Self> {
        let transport = Self::default();
        *transport.reply.lock().unwrap() = Some(Ok(UpstreamReply {
            status,
            body: body.to_string().into_bytes(),
        }));
        Arc::new(transport)
    }

    fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamTransport for RecordingTransport {
    async fn get(&self, url: &Url) -> Result<UpstreamReply> {
        self.requests.lock().unwrap().push(url.clone());
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(ScoutError::network("connection refused")))
    }
}

fn test_server(transport: Arc<RecordingTransport>, client_id: Option<&str>) -> TestServer {
    let transport: Arc<dyn UpstreamTransport> = transport;
    let proxy = SearchProxy::new(
        transport,
        Url::parse("https://upstream.test/v2/search").unwrap(),
        client_id.map(ClientId::new),
    );
    let app = create_app(&ServerConfig::default(), AppState::new(proxy));
    TestServer::new(app).unwrap()
}

fn query_value(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

#[tokio::test]
async fn test_search_returns_upstream_payload() {
    let body = json!({
        "status": "success",
        "response": { "items": { "current_page": 1, "data": [{ "id": 1 }, { "id": 2 }], "total": 2 } }
    });
    let transport = RecordingTransport::replying(200, body.clone());
    let server = test_server(transport.clone(), Some("secret"));

    let response = server
        .get("/api/search")
        .add_query_param("query", "cat")
        .add_query_param("assetType", "icons")
        .add_query_param("perPage", "60")
        .add_query_param("price", "all")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), body);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(query_value(&requests[0], "asset").as_deref(), Some("icon"));
    assert_eq!(query_value(&requests[0], "per_page").as_deref(), Some("60"));
    assert_eq!(query_value(&requests[0], "price"), None);
    assert_eq!(query_value(&requests[0], "client_id").as_deref(), Some("secret"));
}

#[tokio::test]
async fn test_validation_error_is_200_envelope() {
    let transport = Arc::new(RecordingTransport::default());
    let server = test_server(transport.clone(), Some("secret"));

    let response = server
        .get("/api/search")
        .add_query_param("query", "cat")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "error", "message": "Asset type is required" })
    );
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_blank_query_is_rejected() {
    let transport = Arc::new(RecordingTransport::default());
    let server = test_server(transport.clone(), Some("secret"));

    let response = server
        .get("/api/search")
        .add_query_param("query", "   ")
        .add_query_param("assetType", "icons")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Search query is required")
    );
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_missing_client_id() {
    let transport = Arc::new(RecordingTransport::default());
    let server = test_server(transport.clone(), None);

    let response = server
        .get("/api/search")
        .add_query_param("query", "cat")
        .add_query_param("assetType", "icons")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "error", "message": "Client ID not configured" })
    );
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_envelope() {
    let transport = RecordingTransport::replying(429, json!({}));
    let server = test_server(transport, Some("secret"));

    let response = server
        .get("/api/search")
        .add_query_param("query", "cat")
        .add_query_param("assetType", "lottie-animations")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        json!("API request failed with status 429")
    );
}

#[tokio::test]
async fn test_network_failure_is_envelope() {
    let transport = Arc::new(RecordingTransport::default());
    let server = test_server(transport, Some("secret"));

    let response = server
        .get("/api/search")
        .add_query_param("query", "cat")
        .add_query_param("assetType", "icons")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "error", "message": "connection refused" })
    );
}

#[tokio::test]
async fn test_health_reports_upstream_configuration() {
    let server = test_server(Arc::new(RecordingTransport::default()), None);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["upstream_configured"], false);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_version() {
    let server = test_server(Arc::new(RecordingTransport::default()), None);

    let response = server.get("/version").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["name"], "assetscout");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
