// API Server Binary Entry Point
//
// Purpose: Start the Axum compatibility API
// Usage: cargo run --bin api_server

use kit_compat_rust::{bind_listener, create_router, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "kit_compat_rust=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting compatibility API...");

    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  CATALOG_PATH: {}", config.catalog_path);
    tracing::info!("  HOST: {}", config.host);
    tracing::info!("  PORT: {}", config.port);
    tracing::info!(
        "  CORS_ORIGINS: {}",
        if config.allows_any_origin() {
            "*".to_string()
        } else {
            config.cors_origins.join(",")
        }
    );
    tracing::info!("  CACHE_TTL_SECS: {}", config.cache_ttl.as_secs());

    let listener = bind_listener(&config).await?;

    let state = AppState::new(config);
    tracing::info!(
        "Catalog ready: {} bikes",
        state.analyzer.catalog().len()
    );

    let app = create_router(state);

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
