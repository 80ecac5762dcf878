use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use cardex::config::{ConfigLoader, validate_config};
use cardex::extraction::Extractor;
use cardex_server::{AppState, cli::CliArgs, config::ServerConfig, create_router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();

    let server_config = ServerConfig::from_cli_and_env(cli_args.clone())?;

    // Library configuration: defaults, config file, environment
    let mut loader = ConfigLoader::new();
    match &server_config.config_file_path {
        Some(path) => {
            loader
                .load_file(path)
                .with_context(|| format!("loading {}", path.display()))?;
        }
        None => {
            loader.load_default_files();
        }
    }
    loader.load_env();

    let mut config = loader.extract_unvalidated()?;
    server_config.apply_to(&mut config);
    if let Some(level) = &cli_args.log_level {
        config.logging.level = cardex::logging::parse_log_level(level)?;
    }

    // Set up logging
    let _log_guard = cardex::logging::init(&config.logging)?;

    info!("Starting cardex server v{}", cardex::VERSION);

    validate_config(&config)?;
    info!(
        base_url = %config.inference.base_url,
        output = ?config.output.enabled.then_some(&config.output.path),
        "Configuration loaded"
    );

    let extractor = Extractor::from_config(&config)?;
    let app_state = Arc::new(AppState::new(extractor, server_config.clone()));

    // Create the router with all API endpoints
    let app = create_router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("API documentation available at http://{}/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
