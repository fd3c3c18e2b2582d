//! Configuration types for AssetScout

use crate::display::SubtitleCount;
use crate::proxy::ClientId;
use crate::{Result, ScoutError};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Prefix for layered environment overrides, e.g. `ASSETSCOUT__SERVER__PORT`
pub const ENV_PREFIX: &str = "ASSETSCOUT";

/// Bare environment variable holding the upstream credential
pub const CLIENT_ID_ENV: &str = "ICONSCOUT_CLIENT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Upstream search API
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Search page behaviour
    #[serde(default)]
    pub search: SearchSettings,
}

/// Upstream API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Search endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Server-held credential appended to every upstream request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl UpstreamConfig {
    pub fn endpoint(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    /// Maximum request body size in bytes
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            max_request_size: default_max_request_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format (json, pretty, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Which count the results subtitle reports
    #[serde(default)]
    pub subtitle_count: SubtitleCount,
}

impl ScoutConfig {
    /// Load defaults, then `path` (if any), then `ASSETSCOUT__*` variables,
    /// then `ICONSCOUT_CLIENT_ID`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_client_id(path, std::env::var(CLIENT_ID_ENV).ok())
    }

    fn load_with_client_id(path: Option<&Path>, client_id: Option<String>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;

        if let Some(id) = client_id.filter(|id| !id.trim().is_empty()) {
            config.upstream.client_id = Some(ClientId::new(id.trim()));
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        // Try YAML first, then JSON
        match serde_yaml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(_) => {
                let config = serde_json::from_str(&content)?;
                Ok(config)
            }
        }
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.upstream.endpoint()?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(ScoutError::validation(
                "Upstream URL must use http or https scheme",
            ));
        }

        if self.upstream.timeout_seconds == 0 {
            return Err(ScoutError::validation("Upstream timeout must be positive"));
        }

        if self.server.port == 0 {
            return Err(ScoutError::validation("Server port cannot be 0"));
        }

        if self.server.host.trim().is_empty() {
            return Err(ScoutError::validation("Server host cannot be empty"));
        }

        Ok(())
    }
}

// Default value functions
fn default_true() -> bool {
    true
}
fn default_base_url() -> String {
    "https://api.iconscout.com/v2/search".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_max_request_size() -> usize {
    1024 * 1024
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_default_config() {
        let config = ScoutConfig::default();
        assert_eq!(config.upstream.base_url, "https://api.iconscout.com/v2/search");
        assert!(config.upstream.client_id.is_none());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.search.subtitle_count, SubtitleCount::Total);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = ScoutConfig::default();
        config.upstream.client_id = Some(ClientId::new("abc"));
        let yaml = serde_yaml::to_string(&config).unwrap();
        let deserialized: ScoutConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ScoutConfig::default();

        config.upstream.base_url = "ftp://example.com/search".to_string();
        assert!(config.validate().is_err());

        config.upstream.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ScoutError::Url(_))));

        config.upstream.base_url = "http://localhost:9000/search".to_string();
        config.server.port = 0;
        assert!(config.validate().is_err());

        config.server.port = 8080;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_io() {
        let mut config = ScoutConfig::default();
        config.server.port = 4100;
        config.search.subtitle_count = SubtitleCount::Exclusive;
        let temp_file = NamedTempFile::new().unwrap();

        config.to_file(temp_file.path()).unwrap();

        let loaded = ScoutConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_json_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"server": {{"port": 8081}}}}"#).unwrap();

        let loaded = ScoutConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded.server.port, 8081);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert_eq!(loaded.logging.level, "info");
    }

    #[test]
    fn test_layered_load() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "upstream:\n  base_url: http://localhost:9999/search\n  client_id: from-file\nsearch:\n  subtitle_count: exclusive"
        )
        .unwrap();

        let config = ScoutConfig::load_with_client_id(Some(file.path()), None).unwrap();
        assert_eq!(config.upstream.base_url, "http://localhost:9999/search");
        assert_eq!(config.upstream.client_id, Some(ClientId::new("from-file")));
        assert_eq!(config.upstream.timeout_seconds, 30);
        assert_eq!(config.search.subtitle_count, SubtitleCount::Exclusive);

        let config =
            ScoutConfig::load_with_client_id(Some(file.path()), Some(" from-env ".to_string()))
                .unwrap();
        assert_eq!(config.upstream.client_id, Some(ClientId::new("from-env")));
    }

    #[test]
    fn test_load_without_file() {
        let config = ScoutConfig::load_with_client_id(None, Some(String::new())).unwrap();
        assert_eq!(config.server, ServerSettings::default());
        assert!(config.upstream.client_id.is_none());
    }
}
