//! todos-server: a REST list service over a document store.
//!
//! The store is opened once at startup and handed to every handler through
//! [`AppState`]. Three endpoints live under a configurable prefix:
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `{prefix}` | 200, every task |
//! | POST | `{prefix}` | 201, the created task with its `_id` |
//! | DELETE | `{prefix}/{id}` | 200 / 400 / 404 with a `{ "message" }` body |
//!
//! `GET /` serves the browser app, which drives the same endpoints; its
//! wasm bundle and other assets are served from the fallback.
//!
//! # Example
//!
//! ```ignore
//! let store = todos_server::store::connect("memory://", "todos").await?;
//! let state = todos_server::AppState::new(store, "/api/todos")?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, todos_server::app(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod page;
pub mod routes;
pub mod store;
pub mod telemetry;

use axum::Router;
use axum::routing::get;
use config::ConfigError;
use std::sync::Arc;
use store::TaskStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// State shared by every request: the store handle and the mount prefix.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TaskStore>,
    prefix: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>, prefix: &str) -> Result<Self, ConfigError> {
        config::validate_prefix(prefix)?;
        Ok(Self {
            store,
            prefix: Arc::from(prefix),
        })
    }

    pub fn store(&self) -> &dyn TaskStore {
        self.store.as_ref()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/index.html", get(page::index))
        .nest(state.prefix(), routes::todo_routes())
        .fallback(page::static_asset)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
