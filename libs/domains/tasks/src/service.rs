use std::sync::Arc;
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskPayload};
use crate::repository::TaskRepository;

/// Service layer between the HTTP handlers and the repository.
///
/// Stateless per request; holds nothing but the repository handle.
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every stored task
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    /// Create a new task
    #[instrument(skip(self, input))]
    pub async fn create_task(&self, input: TaskPayload) -> TaskResult<Task> {
        self.repository.create(input).await
    }

    /// Overwrite an existing task
    #[instrument(skip(self, input), fields(task_id = id))]
    pub async fn update_task(&self, id: i32, input: TaskPayload) -> TaskResult<Task> {
        self.repository.update(id, input).await
    }

    /// Delete a task, failing when the id is unknown.
    ///
    /// Lookup and removal are two store calls, mirroring the update
    /// path; there is no isolation between them.
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i32) -> TaskResult<()> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        self.repository.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTaskRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn delete_missing_task_never_touches_the_store() {
        let mut mock_repo = MockTaskRepository::new();

        mock_repo
            .expect_get_by_id()
            .with(eq(999))
            .returning(|_| Ok(None));
        mock_repo.expect_delete().times(0);

        let service = TaskService::new(mock_repo);
        let err = service.delete_task(999).await.unwrap_err();

        assert!(matches!(err, TaskError::NotFound(999)));
    }

    #[tokio::test]
    async fn delete_existing_task_removes_it() {
        let mut mock_repo = MockTaskRepository::new();

        mock_repo.expect_get_by_id().with(eq(1)).returning(|id| {
            Ok(Some(Task {
                id,
                task: "buy milk".to_string(),
                is_done: false,
            }))
        });
        mock_repo
            .expect_delete()
            .with(eq(1))
            .returning(|_| Ok(true));

        let service = TaskService::new(mock_repo);
        assert!(service.delete_task(1).await.is_ok());
    }

    #[tokio::test]
    async fn update_propagates_not_found() {
        let mut mock_repo = MockTaskRepository::new();

        mock_repo
            .expect_update()
            .returning(|id, _| Err(TaskError::NotFound(id)));

        let service = TaskService::new(mock_repo);
        let err = service
            .update_task(42, TaskPayload::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::NotFound(42)));
    }

    #[tokio::test]
    async fn list_surfaces_store_failures() {
        let mut mock_repo = MockTaskRepository::new();

        mock_repo
            .expect_list()
            .returning(|| Err(TaskError::Database("connection reset".to_string())));

        let service = TaskService::new(mock_repo);
        let err = service.list_tasks().await.unwrap_err();

        assert!(matches!(err, TaskError::Database(_)));
    }
}
