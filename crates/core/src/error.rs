//! Error handling for AssetScout core library

use std::fmt;
use thiserror::Error;

/// Result type alias for AssetScout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Main error type for AssetScout operations
#[derive(Error, Debug)]
pub enum ScoutError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Missing or invalid caller input
    #[error("{message}")]
    Validation { message: String },

    /// Missing or invalid operator configuration
    #[error("{message}")]
    Config { message: String },

    /// Upstream answered with a non-success status
    #[error("API request failed with status {status}")]
    Upstream { status: u16 },

    /// Upstream answered with a body we could not interpret
    #[error("Malformed upstream response: {message}")]
    MalformedResponse { message: String },

    /// Transport failures
    #[error("{message}")]
    Network { message: String },

    /// Invalid state errors
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// A search ended with an error message on the controller state
    #[error("Search failed: {message}")]
    Search { message: String },
}

impl ScoutError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an upstream status error
    pub fn upstream(status: u16) -> Self {
        Self::Upstream { status }
    }

    /// Create a malformed response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a search failure error
    pub fn search<S: Into<String>>(message: S) -> Self {
        Self::Search {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Http(_) | Self::Network { .. } => ErrorCategory::Network,
            Self::Json(_) | Self::Yaml(_) => ErrorCategory::Serialization,
            Self::ConfigLoad(_) | Self::Config { .. } => ErrorCategory::Configuration,
            Self::Url(_) => ErrorCategory::Url,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Upstream { .. } | Self::MalformedResponse { .. } => ErrorCategory::Upstream,
            Self::InvalidState { .. } => ErrorCategory::State,
            Self::Search { .. } => ErrorCategory::Search,
        }
    }
}

/// Error categories for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    FileSystem,
    Network,
    Serialization,
    Configuration,
    Url,
    Validation,
    Upstream,
    State,
    Search,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem => write!(f, "filesystem"),
            Self::Network => write!(f, "network"),
            Self::Serialization => write!(f, "serialization"),
            Self::Configuration => write!(f, "configuration"),
            Self::Url => write!(f, "url"),
            Self::Validation => write!(f, "validation"),
            Self::Upstream => write!(f, "upstream"),
            Self::State => write!(f, "state"),
            Self::Search => write!(f, "search"),
        }
    }
}
