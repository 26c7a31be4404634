use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskPayload};

/// Repository trait for task persistence
///
/// Implementations can use different storage backends; the HTTP layer
/// only sees this interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks in store order (ascending id); an empty store yields
    /// an empty vec, never an error
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Look up a single task, `None` when the id has no row
    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// Insert a new task; the store assigns a fresh id
    async fn create(&self, input: TaskPayload) -> TaskResult<Task>;

    /// Overwrite both fields of an existing task
    async fn update(&self, id: i32, input: TaskPayload) -> TaskResult<Task>;

    /// Remove a task; `false` when the id had no row
    async fn delete(&self, id: i32) -> TaskResult<bool>;
}

/// In-memory implementation of TaskRepository (tests and local
/// development)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    inner: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    tasks: BTreeMap<i32, Task>,
    next_id: i32,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> TaskResult<Vec<Task>> {
        let state = self.inner.read().await;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let state = self.inner.read().await;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn create(&self, input: TaskPayload) -> TaskResult<Task> {
        let mut state = self.inner.write().await;
        state.next_id += 1;
        let task = Task {
            id: state.next_id,
            task: input.task,
            is_done: input.is_done,
        };
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: i32, input: TaskPayload) -> TaskResult<Task> {
        let mut state = self.inner.write().await;
        let task = state.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        task.task = input.task;
        task.is_done = input.is_done;
        Ok(task.clone())
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let mut state = self.inner.write().await;
        Ok(state.tasks.remove(&id).is_some())
    }
}
