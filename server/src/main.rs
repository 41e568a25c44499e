//! Task list server.
//!
//! Reads its configuration from flags or the environment, opens the store
//! once and serves the list endpoints plus the browser app.

use anyhow::Context;
use clap::Parser;
use todos_server::config::Config;
use todos_server::{AppState, app, store, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = Config::parse();
    config.validate()?;

    let store = store::connect(&config.database_url, &config.collection)
        .await
        .with_context(|| format!("connecting to {}", config.database_url))?;
    tracing::info!(kind = store.kind(), collection = %config.collection, "store connected");

    let state = AppState::new(store, &config.prefix)?;
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("Server running on http://{addr}");
    tracing::info!("  GET    {}        - list todos", config.prefix);
    tracing::info!("  POST   {}        - create a todo", config.prefix);
    tracing::info!("  DELETE {}/{{id}}   - delete a todo", config.prefix);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
