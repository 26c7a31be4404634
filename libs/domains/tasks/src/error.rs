use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task {0} not found")]
    NotFound(i32),

    #[error("Invalid task id: {0}")]
    InvalidId(String),

    #[error("Invalid request payload")]
    InvalidPayload(#[from] JsonRejection),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for the HTTP status mapping.
///
/// Not-found maps to 400 rather than 404: existing clients of this API
/// depend on that status, so it is kept. Store failures keep a generic
/// body; the detail only goes to the log.
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => AppError::BadRequest(format!("Task {} not found", id)),
            TaskError::InvalidId(raw) => {
                AppError::BadRequest(format!("Invalid task id: {}", raw))
            }
            TaskError::InvalidPayload(rejection) => {
                tracing::info!("payload rejected: {}", rejection);
                AppError::BadRequest("Invalid request payload".to_string())
            }
            TaskError::Database(detail) => {
                tracing::error!("task store failure: {}", detail);
                AppError::InternalServerError("Task store is unavailable".to_string())
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}
