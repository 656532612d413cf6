//! Server entry point: load config, wire providers, serve until ctrl-c.

use std::sync::Arc;

use anyhow::Context;
use tipo_server::naver::NaverClient;
use tipo_server::routes::{build_router, AppState};
use tipo_server::trending::GoogleTrendsClient;
use tipo_server::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; deployed environments set real variables.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tipo_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().context("loading configuration")?;

    let search = Arc::new(NaverClient::new(&config).context("building search client")?);
    let trends = Arc::new(GoogleTrendsClient::new(&config).context("building trends client")?);
    let app = build_router(AppState { search, trends });

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("binding to {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "tipo server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(error) => {
            // Without a working signal handler, run until killed.
            tracing::warn!(%error, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    }
}
