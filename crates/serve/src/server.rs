//! Server module for AssetScout serve crate

use crate::api::create_routes;
use crate::handlers::AppState;
use crate::ServerConfig;
use assetscout_core::{Result, ScoutError};
use axum::{
    http::{header::ACCEPT, Method},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// AssetScout HTTP server
pub struct ScoutServer {
    config: ServerConfig,
    app: Router,
}

impl ScoutServer {
    /// Create a new server instance
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        let app = create_app(&config, state);
        Self { config, app }
    }

    /// Bind to the configured address and serve until shutdown
    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| ScoutError::validation(format!("Invalid address {}: {}", addr, e)))?;

        let listener = TcpListener::bind(socket_addr)
            .await
            .map_err(|e| ScoutError::network(format!("Failed to bind to {}: {}", addr, e)))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!("Starting AssetScout server on {}", addr);

        axum::serve(listener, self.app)
            .await
            .map_err(|e| ScoutError::network(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Create the Axum application with middleware
pub fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let mut app = create_routes().with_state(state);

    // Add middleware layers
    app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(config.max_request_size)),
    );

    // Add CORS if enabled
    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers([ACCEPT]);

        app = app.layer(cors);
    }

    app
}

/// Server builder for configuration
pub struct ServerBuilder {
    config: ServerConfig,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn with_config(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Set the host address
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.config.cors_enabled = enabled;
        self
    }

    /// Set maximum request size
    pub fn max_request_size(mut self, size: usize) -> Self {
        self.config.max_request_size = size;
        self
    }

    /// Build the server around `state`
    pub fn build(self, state: AppState) -> ScoutServer {
        ScoutServer::new(self.config, state)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
