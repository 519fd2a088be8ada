use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use compass_core::app_state::build_app_state;
use compass_core::core::config::app_config::AppConfig;
use compass_core::core::logging::tracing_init::init_tracing;
use compass_core::routes::app_router;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _guard = init_tracing(&config.log_dir)?;

    let state = build_app_state(&config)?;
    let app = app_router().with_state(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!(
        addr = %config.bind_addr,
        plugins = ?config.plugins.keys().collect::<Vec<_>>(),
        "compass-core listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(?e, "Failed to listen for shutdown signal");
    }
}
