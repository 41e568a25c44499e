//! Document store holding the task collection.
//!
//! Handlers only see [`TaskStore`]; the backend is picked from the connection
//! string once at startup by [`connect`].

mod id;
mod memory;
mod sqlite;

pub use id::IdGenerator;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use std::sync::Arc;
use todos_shared::{NewTask, Task, TaskId};

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("malformed document `{id}`: {reason}")]
    Document { id: String, reason: String },

    #[error("invalid collection name `{0}`")]
    InvalidCollection(String),

    #[error("unsupported connection string `{0}` (expected memory:// or sqlite:)")]
    UnsupportedUrl(String),
}

/// The three operations the list service needs from its store.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// Every document in the collection, in store order.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Insert the document and return it with its assigned id.
    async fn create(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Remove the document with `id`. Returns `false` when nothing matched.
    async fn delete(&self, id: &TaskId) -> Result<bool, StoreError>;

    /// Short backend name for logs.
    fn kind(&self) -> &'static str;
}

/// Open the store named by `url`, using `collection` as the collection name.
pub async fn connect(url: &str, collection: &str) -> Result<Arc<dyn TaskStore>, StoreError> {
    if url.starts_with("memory:") {
        return Ok(Arc::new(MemoryStore::new()));
    }
    if url.starts_with("sqlite:") {
        return Ok(Arc::new(SqliteStore::connect(url, collection).await?));
    }
    Err(StoreError::UnsupportedUrl(url.to_string()))
}
