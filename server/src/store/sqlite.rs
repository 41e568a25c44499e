//! SQLite backend: one table per collection, one JSON document per row.

use super::{IdGenerator, StoreError, TaskStore};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::time::Duration;
use todos_shared::{NewTask, Task, TaskId};

/// SQLite-backed collection: one table, one JSON document per row.
#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
    ids: IdGenerator,
    sql: Statements,
}

#[derive(Debug)]
struct Statements {
    select_all: String,
    insert: String,
    delete: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        Self {
            select_all: format!("SELECT _id, doc FROM {table} ORDER BY rowid"),
            insert: format!("INSERT INTO {table} (_id, doc) VALUES (?, ?)"),
            delete: format!("DELETE FROM {table} WHERE _id = ?"),
        }
    }
}

/// Stored form of a task: everything but the id.
#[derive(Serialize)]
struct DocumentRef<'a> {
    title: &'a str,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

impl SqliteStore {
    /// Open `url` and make sure the collection table exists.
    ///
    /// The pool holds a single connection shared by every request.
    pub async fn connect(url: &str, collection: &str) -> Result<Self, StoreError> {
        if !is_identifier(collection) {
            return Err(StoreError::InvalidCollection(collection.to_string()));
        }

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect(url)
            .await?;

        let create = format!(
            "CREATE TABLE IF NOT EXISTS {collection} (_id TEXT PRIMARY KEY NOT NULL, doc TEXT NOT NULL)"
        );
        sqlx::query(&create).execute(&pool).await?;

        Ok(Self {
            pool,
            ids: IdGenerator::new(),
            sql: Statements::for_table(collection),
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl TaskStore for SqliteStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let rows: Vec<(String, String)> = sqlx::query_as(&self.sql.select_all)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(id, doc)| {
                let task_id = id.parse::<TaskId>().map_err(|e| StoreError::Document {
                    id: id.clone(),
                    reason: e.to_string(),
                })?;
                let body: NewTask =
                    serde_json::from_str(&doc).map_err(|e| StoreError::Document {
                        id: id.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(body.with_id(task_id))
            })
            .collect()
    }

    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        let task = task.with_id(self.ids.next_id());
        let id = task.id.to_string();
        let doc = serde_json::to_string(&DocumentRef {
            title: &task.title,
            extra: &task.extra,
        })
        .map_err(|e| StoreError::Document {
            id: id.clone(),
            reason: e.to_string(),
        })?;

        sqlx::query(&self.sql.insert)
            .bind(&id)
            .bind(&doc)
            .execute(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, StoreError> {
        let result = sqlx::query(&self.sql.delete)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    fn kind(&self) -> &'static str {
        "sqlite"
    }
}
