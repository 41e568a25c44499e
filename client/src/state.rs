//! Client view-state: the local task list and the pending input.
//!
//! Every action is one round trip. The local list is reconciled with the
//! response on success and left alone on failure; failures are logged and
//! never surfaced otherwise. Nothing serializes overlapping actions.

use crate::api::{ClientError, TodoApi};
use std::fmt;
use todos_shared::{Task, TaskId};

/// A task as the view holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    pub task: Task,
    /// Local only; never sent to the service and lost on reload.
    pub completed: bool,
}

impl From<Task> for TodoItem {
    fn from(task: Task) -> Self {
        Self {
            task,
            completed: false,
        }
    }
}

#[derive(Debug)]
pub struct TodoState<A> {
    api: A,
    items: Vec<TodoItem>,
    pending_title: String,
}

impl<A: TodoApi> TodoState<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
            pending_title: String::new(),
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn pending_title(&self) -> &str {
        &self.pending_title
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replace the local list with the service's. On failure the list is empty.
    pub async fn load(&mut self) {
        let result = self.api.list().await;
        self.apply_loaded(result);
    }

    pub fn set_pending_title(&mut self, text: impl Into<String>) {
        self.pending_title = text.into();
    }

    /// Create a task from the pending title.
    ///
    /// A blank title sends nothing.
    pub async fn submit(&mut self) {
        let Some(title) = self.pending_submit() else {
            return;
        };
        let result = self.api.create(&title).await;
        self.apply_created(result);
    }

    /// Delete the task with `id` and drop it locally once the service agrees.
    pub async fn remove(&mut self, id: &TaskId) {
        tracing::debug!(%id, "deleting task");
        let result = self.api.delete(id).await;
        self.apply_removed(id, result);
    }

    // The `apply_*` halves let a UI issue the request itself and hand the
    // result back later, without holding the state across the await.

    /// The title `submit` would send, or `None` if it would send nothing.
    pub fn pending_submit(&self) -> Option<String> {
        if self.pending_title.trim().is_empty() {
            None
        } else {
            Some(self.pending_title.clone())
        }
    }

    pub fn apply_loaded(&mut self, result: Result<Vec<Task>, ClientError>) {
        match result {
            Ok(tasks) => self.items = tasks.into_iter().map(TodoItem::from).collect(),
            Err(err) => {
                tracing::error!(%err, "Error fetching todos");
                self.items.clear();
            }
        }
    }

    pub fn apply_created(&mut self, result: Result<Task, ClientError>) {
        match result {
            Ok(task) => {
                self.items.push(task.into());
                self.pending_title.clear();
            }
            Err(err) => tracing::error!(%err, "Error adding task"),
        }
    }

    pub fn apply_removed(&mut self, id: &TaskId, result: Result<(), ClientError>) {
        match result {
            Ok(()) => self.items.retain(|item| item.task.id != *id),
            Err(err) => tracing::error!(%err, %id, "Error deleting task"),
        }
    }

    /// Flip the local completion flag. Returns `false` if no such task is shown.
    pub fn toggle(&mut self, id: &TaskId) -> bool {
        match self.items.iter_mut().find(|item| item.task.id == *id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }
}

impl<A> fmt::Display for TodoState<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Todo List")?;
        if self.items.is_empty() {
            return writeln!(f, "  (no tasks)");
        }
        for item in &self.items {
            let mark = if item.completed { 'x' } else { ' ' };
            writeln!(f, "  [{mark}] {}  ({})", item.task.title, item.task.id)?;
        }
        Ok(())
    }
}
