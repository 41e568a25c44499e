//! In-process backend for `memory://`. Contents are lost on exit.

use super::{IdGenerator, StoreError, TaskStore};
use async_trait::async_trait;
use todos_shared::{NewTask, Task, TaskId};
use tokio::sync::RwLock;

/// In-process collection, kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<Vec<Task>>,
    ids: IdGenerator,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        let task = task.with_id(self.ids.next_id());
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().await;
        match tasks.iter().position(|t| t.id == *id) {
            Some(index) => {
                tasks.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
