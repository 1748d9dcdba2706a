use std::sync::Arc;

use anyhow::Context;

use crate::app::{self, AppState};
use crate::auth::JwtKeys;
use crate::config;
use crate::database::{DatabaseManager, PgStore};

pub async fn handle(port: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting TokenLens API in {:?} mode", config.environment);

    let keys = JwtKeys::from_secret(&config.security.jwt_secret)
        .context("JWT_SECRET must be set before serving")?;

    let pool = DatabaseManager::connect_lazy(&config.database)?;
    let state = AppState::new(Arc::new(PgStore::new(pool.clone())), keys);
    let app = app::router(state, config);

    let bind_addr = format!("0.0.0.0:{}", port.unwrap_or(config.api.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("TokenLens API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("TokenLens API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
