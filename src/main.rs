//! AssetScout - design asset search
//!
//! AssetScout proxies searches to the IconScout API behind a stable envelope
//! and drives a search page state (query, filters, pagination, route) from
//! the command line or over HTTP.

use assetscout_core::{
    FiltersPatch, MemoryNavigator, Navigator, Result, ScoutConfig, ScoutError, SearchBackend,
    SearchController,
};
use assetscout_infra::HttpSearchBackend;
use assetscout_serve::{AppState, ServerBuilder, ServerConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "assetscout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AssetScout - search icons, illustrations, 3D assets and animations")]
#[command(long_about = r#"
AssetScout searches the IconScout catalogue through a server-side proxy that
keeps the API credential private and normalises every reply into one
envelope shape.

The tool can operate in two modes:
- Server: expose GET /api/search for browsers and other clients
- Search: run a search from the terminal, optionally through a running server

The upstream credential is read from ICONSCOUT_CLIENT_ID or the config file.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (json, pretty)
    #[arg(short, long, default_value = "pretty", global = true)]
    output: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the search proxy server
    Serve {
        /// Server host address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a search and print the results
    Search {
        /// Search terms
        query: String,

        /// Asset type (all-assets, icons, illustrations, 3d-illustrations, lottie-animations)
        #[arg(short, long, default_value = "all-assets")]
        asset_type: String,

        /// Price filter (all, free, premium)
        #[arg(long, default_value = "all")]
        price: String,

        /// Result view (item, pack)
        #[arg(long, default_value = "item")]
        view: String,

        /// Sort order (featured, popular, latest, relevant)
        #[arg(short, long, default_value = "featured")]
        sort: String,

        /// Only show IconScout exclusive assets
        #[arg(long)]
        exclusive: bool,

        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: u32,

        /// Search through a running AssetScout server instead of calling upstream directly
        #[arg(long)]
        server: Option<url::Url>,
    },

    /// Initialize AssetScout configuration
    Init {
        /// Configuration file path
        #[arg(default_value = "assetscout.yaml")]
        path: PathBuf,
    },

    /// Validate configuration file
    Validate {
        /// Configuration file to validate
        path: PathBuf,
    },

    /// Show version information
    Version,

    /// Show health status
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ScoutConfig::load(cli.config.as_deref())?;
    init_logging(&cli, &config)?;

    info!("Starting AssetScout v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Serve { ref host, port }) => {
            handle_serve(host.clone(), port, &config).await?;
        }

        Some(Commands::Search {
            ref query,
            ref asset_type,
            ref price,
            ref view,
            ref sort,
            exclusive,
            pages,
            ref server,
        }) => {
            let patch = FiltersPatch {
                exclusive: Some(exclusive),
                price: Some(price.parse()?),
                asset_type: Some(asset_type.parse()?),
                view: Some(view.parse()?),
                sort_by: Some(sort.parse()?),
            };
            handle_search(query, patch, pages, server.as_ref(), &config, &cli).await?;
        }

        Some(Commands::Init { ref path }) => {
            handle_init(path)?;
        }

        Some(Commands::Validate { ref path }) => {
            handle_validate(path, &cli)?;
        }

        Some(Commands::Version) => {
            handle_version();
        }

        Some(Commands::Health) => {
            handle_health(&config, &cli)?;
        }

        None => {
            handle_default();
        }
    }

    Ok(())
}

/// `--verbose` and `--output json` override the `logging` section
fn init_logging(cli: &Cli, config: &ScoutConfig) -> Result<()> {
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if cli.output == "json" {
        logging.format = "json".to_string();
    }
    assetscout_core::init_logging(&logging)
}

async fn handle_serve(host: Option<String>, port: Option<u16>, config: &ScoutConfig) -> Result<()> {
    config.validate()?;

    if config.upstream.client_id.is_none() {
        warn!(
            "No upstream client id configured; every search will answer \"Client ID not configured\""
        );
    }

    let state = AppState::from_config(&config.upstream)?;
    let mut builder = ServerBuilder::with_config(ServerConfig::from(&config.server));
    if let Some(host) = host {
        builder = builder.host(host);
    }
    if let Some(port) = port {
        builder = builder.port(port);
    }

    let server = builder.build(state);
    info!(
        "Serving /api/search on {}:{}",
        server.config().host,
        server.config().port
    );
    server.start().await
}

async fn handle_search(
    query: &str,
    patch: FiltersPatch,
    pages: u32,
    server: Option<&url::Url>,
    config: &ScoutConfig,
    cli: &Cli,
) -> Result<()> {
    let backend: Arc<dyn SearchBackend> = match server {
        Some(base) => {
            info!("Searching through server at {}", base);
            Arc::new(HttpSearchBackend::new(
                base,
                Duration::from_secs(config.upstream.timeout_seconds),
            )?)
        }
        None => Arc::new(assetscout_infra::build_proxy(&config.upstream)?),
    };

    let navigator = Arc::new(MemoryNavigator::default());
    let controller = SearchController::new(backend, navigator.clone())
        .with_subtitle_count(config.search.subtitle_count);

    controller.update_filters(patch).await;
    controller.update_query(query).await;

    for _ in 1..pages {
        if !controller.load_more_results().await {
            break;
        }
    }

    let state = controller.snapshot();
    let route = navigator.current();

    match cli.output.as_str() {
        "json" => {
            let result = serde_json::json!({
                "title": controller.title(),
                "subtitle": controller.subtitle(),
                "route": route.to_string(),
                "state": state,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            println!("{}", controller.title());
            println!("{}", controller.subtitle());
            println!("Route: {}", route);
            println!();

            if let Some(error) = &state.error {
                println!("❌ {}", error);
            }

            for item in state.results() {
                let id = item.id().unwrap_or_else(|| "-".to_string());
                let marker = if item.is_exclusive() { " ★" } else { "" };
                let label = item
                    .asset_label()
                    .map(|label| format!(" [{}]", label))
                    .unwrap_or_default();
                println!("  • {} {}{}{}", id, item.name().unwrap_or(""), label, marker);
            }

            if state.has_more_pages() {
                println!();
                println!(
                    "Loaded {} of {} results (page {})",
                    state.raw_results.len(),
                    state.api_total_items,
                    state.current_page
                );
            }
        }
    }

    search_outcome(state.error)
}

/// The controller keeps only the message, so failures are reported as search errors
fn search_outcome(error: Option<String>) -> Result<()> {
    match error {
        Some(message) => Err(ScoutError::search(message)),
        None => Ok(()),
    }
}

fn handle_init(path: &Path) -> Result<()> {
    info!("Initializing AssetScout configuration at {:?}", path);

    if path.exists() {
        return Err(ScoutError::validation(format!(
            "Configuration file already exists: {:?}. Remove it first or use a different path.",
            path
        )));
    }

    ScoutConfig::default().to_file(path)?;

    println!("✅ Configuration initialized at {:?}", path);
    println!();
    println!("Next steps:");
    println!("1. Set ICONSCOUT_CLIENT_ID or add upstream.client_id to the file");
    println!("2. Run 'assetscout validate {:?}' to check your configuration", path);
    println!("3. Run 'assetscout --config {:?} serve' to start the proxy", path);

    Ok(())
}

fn handle_validate(path: &Path, cli: &Cli) -> Result<()> {
    info!("Validating configuration at {:?}", path);

    if !path.exists() {
        return Err(ScoutError::validation(format!(
            "Configuration file not found: {:?}",
            path
        )));
    }

    let config = ScoutConfig::from_file(path)?;

    match config.validate() {
        Ok(()) => match cli.output.as_str() {
            "json" => {
                let result = serde_json::json!({
                    "valid": true,
                    "message": "Configuration is valid",
                    "upstream_configured": config.upstream.client_id.is_some(),
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            _ => {
                println!("✅ Configuration is valid");
                println!("🔎 Upstream URL: {}", config.upstream.base_url);
                println!(
                    "🔑 Client id: {}",
                    if config.upstream.client_id.is_some() {
                        "configured"
                    } else {
                        "missing"
                    }
                );
                println!("🌐 Server: {}:{}", config.server.host, config.server.port);
            }
        },
        Err(e) => {
            match cli.output.as_str() {
                "json" => {
                    let result = serde_json::json!({
                        "valid": false,
                        "error": e.to_string()
                    });
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                _ => {
                    println!("❌ Configuration is invalid: {}", e);
                }
            }
            return Err(e);
        }
    }

    Ok(())
}

fn handle_version() {
    println!("{}", assetscout_core::version_info());
    println!("  Server: v{}", assetscout_serve::VERSION);
    println!("  Infra: v{}", assetscout_infra::VERSION);
}

fn handle_health(config: &ScoutConfig, cli: &Cli) -> Result<()> {
    info!("Running health check");

    let status = assetscout_infra::health_check(&config.upstream)?;

    match cli.output.as_str() {
        "json" => {
            let result = serde_json::json!({
                "healthy": status.is_healthy(),
                "endpoint_valid": status.endpoint_valid,
                "upstream_configured": status.upstream_configured,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            let mark = |ok: bool| if ok { "✓" } else { "✗" };
            println!(
                "{} AssetScout is {}",
                if status.is_healthy() { "✅" } else { "❌" },
                if status.is_healthy() { "healthy" } else { "unhealthy" }
            );
            println!("  {} Upstream URL valid", mark(status.endpoint_valid));
            println!("  {} Client id configured", mark(status.upstream_configured));
        }
    }

    if !status.is_healthy() {
        return Err(ScoutError::config("Health check failed"));
    }
    Ok(())
}

fn handle_default() {
    println!("🔎 Welcome to AssetScout");
    println!();
    println!("Search icons, illustrations, 3D illustrations and Lottie animations.");
    println!();
    println!("Quick start:");
    println!("  assetscout init                    # Create configuration file");
    println!("  assetscout search rocket -a icons  # Search from the terminal");
    println!("  assetscout serve                   # Start the /api/search proxy");
    println!("  assetscout --help                  # Show all options");
}
