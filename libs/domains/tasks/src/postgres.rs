use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{Task, TaskPayload},
    repository::TaskRepository,
};

/// PostgreSQL-backed repository
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn list(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, input: TaskPayload) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn update(&self, id: i32, input: TaskPayload) -> TaskResult<Task> {
        // Fetch-then-save, not a single transaction; concurrent updates
        // on the same id are last-writer-wins
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        let active_model = entity::ActiveModel {
            id: Set(model.id),
            task: Set(input.task),
            is_done: Set(input.is_done),
        };

        let updated = active_model.update(&self.db).await?;

        tracing::info!(task_id = id, "Updated task");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
        }
        Ok(result.rows_affected > 0)
    }
}
