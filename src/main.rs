mod config;
mod dictionary;
mod envelope;
mod error;
mod handlers;
mod languages;
mod routes;
mod state;
mod translate;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translation_backend=debug,tower_http=debug")),
        )
        .init();

    let config = Config::resolve()?;
    info!(
        environment = ?config.server.environment,
        primary = %config.providers.libretranslate_url,
        secondary = %config.providers.mymemory_url,
        dictionary = %config.providers.dictionary_url,
        "Configuration resolved"
    );

    let app_state = AppState::new(config.clone())?;
    let app = routes::build_app(app_state);

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("HOST must be an IP address, got {}", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
