use anyhow::{Context, Result};
use speech::{routes, Config, MemoryResolver, PageAssetServer, ServeState};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config_path = std::env::var("SPEECH_CONFIG")
        .unwrap_or_else(|_| speech::config::DEFAULT_CONFIG_PATH.to_string());
    let mut config = Config::load(&config_path)?;

    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("PORT is not a valid port: {}", port))?;
    }

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("Invalid logging level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("speech starting with config {}", config_path);

    let resolver = load_registry(&config.registry.fixtures)?;
    let site = Arc::new(config.site.clone());
    let assets = Arc::new(PageAssetServer::new(site.clone()));

    let state = ServeState::new(Arc::new(resolver), assets, site)
        .with_claim_get_path(config.assets.claim_get_path.clone());

    let app = routes(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}

/// Registry fixtures are optional; without them every lookup misses
fn load_registry(path: &str) -> Result<MemoryResolver> {
    if !Path::new(path).exists() {
        warn!("Registry file {} not found, starting with an empty registry", path);
        return Ok(MemoryResolver::default());
    }

    let resolver = MemoryResolver::load(path)?;
    info!(
        "Loaded {} channels and {} claims from {}",
        resolver.registry().channels.len(),
        resolver.registry().claims.len(),
        path
    );
    Ok(resolver)
}
