//! AssetScout Core Library
//!
//! Core functionality for the AssetScout search page.
//! This library provides the filter model and its URL codec, the upstream
//! search proxy, and the search state controller that keeps results, filters
//! and the route in sync.

pub mod asset_type;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod proxy;
pub mod route;
pub mod types;
pub mod url_codec;

// Re-export commonly used types
pub use asset_type::{humanize_asset_type, normalize_asset_type};
pub use config::ScoutConfig;
pub use controller::{SearchBackend, SearchController, SearchEvent, SearchState};
pub use display::{format_number, SubtitleCount};
pub use error::{ErrorCategory, Result, ScoutError};
pub use proxy::{
    ClientId, SearchEnvelope, SearchParams, SearchProxy, SearchRequest, UpstreamReply,
    UpstreamTransport,
};
pub use route::{MemoryNavigator, Navigator, SearchRoute};
pub use types::{AssetItem, AssetType, FiltersPatch, Price, SearchFilters, SortBy, View};

/// HTTP client targets that would echo the upstream URL, and with it the
/// client id, at debug level
const CREDENTIAL_BEARING_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util", "h2"];

/// Build the filter for `level`, capping credential-bearing targets at `warn`
fn log_filter(level: &str) -> Result<tracing_subscriber::EnvFilter> {
    use tracing_subscriber::filter::Directive;

    let mut filter = tracing_subscriber::EnvFilter::try_new(level)
        .map_err(|e| ScoutError::config(format!("Invalid log level '{}': {}", level, e)))?;

    for target in CREDENTIAL_BEARING_TARGETS {
        let directive = format!("{}=warn", target)
            .parse::<Directive>()
            .map_err(|e| ScoutError::config(format!("Invalid log directive: {}", e)))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

/// Initialize logging from the `logging` section of the config
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging(config: &crate::config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

    let registry = tracing_subscriber::registry().with(log_filter(&config.level)?);

    let result = match config.format.as_str() {
        "json" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        "text" | "pretty" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        "compact" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        other => {
            return Err(ScoutError::validation(format!("Unknown log format: {}", other)));
        }
    };

    result.map_err(|e| ScoutError::invalid_state(format!("Logging already initialized: {}", e)))
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
