use anyhow::Context;

use crate::app::{app, AppState};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgStore};

pub async fn handle(
    mut config: AppConfig,
    port: Option<u16>,
    in_memory: bool,
) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    let bind_addr = config.bind_addr();

    let state = if in_memory {
        tracing::warn!("Running with the in-memory store; data is lost on exit");
        AppState::in_memory(config)
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        DatabaseManager::migrate(&pool)
            .await
            .context("failed to prepare database schema")?;
        AppState::new(config, PgStore::new(pool))
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Tweet API listening on http://{}", bind_addr);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
