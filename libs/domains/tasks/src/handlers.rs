use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskPayload};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, update_task, delete_task),
    components(schemas(Task, TaskPayload)),
    tags(
        (name = "tasks", description = "Task CRUD operations")
    )
)]
pub struct ApiDoc;

/// Router for the task endpoints, to be nested under `/task`
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}", put(update_task).delete(delete_task))
        .with_state(shared_service)
}

/// Path ids must be one or more decimal digits; signs, hex, and
/// out-of-range values are all client errors
fn parse_id(raw: &str) -> TaskResult<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TaskError::InvalidId(raw.to_string()));
    }
    raw.parse::<i32>()
        .map_err(|_| TaskError::InvalidId(raw.to_string()))
}

/// List every task
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    responses(
        (status = 200, description = "All stored tasks", body = Vec<Task>),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.list_tasks().await?;
    Ok(Json(tasks))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = TaskPayload,
    responses(
        (status = 200, description = "Task stored", body = String),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> TaskResult<&'static str> {
    let Json(input) = payload?;

    service.create_task(input).await?;

    // The assigned id is deliberately not returned; existing clients
    // expect only this confirmation text
    Ok("Task updated successfully")
}

/// Overwrite an existing task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task id")
    ),
    request_body = TaskPayload,
    responses(
        (status = 200, description = "Task overwritten", body = String),
        (status = 400, description = "Bad id, malformed body, or unknown task"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> TaskResult<&'static str> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;

    service.update_task(id, input).await?;
    Ok("Task updated successfully")
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task id")
    ),
    responses(
        (status = 200, description = "Task removed", body = String),
        (status = 400, description = "Bad id or unknown task"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<&'static str> {
    let id = parse_id(&id)?;

    service.delete_task(id).await?;
    Ok("Task deleted successfully")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryTaskRepository;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let service = TaskService::new(InMemoryTaskRepository::new());
        Router::new().nest("/api/task", router(service))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn list_json(app: &Router) -> serde_json::Value {
        let response = app
            .clone()
            .oneshot(Request::get("/api/task").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_on_empty_store_returns_empty_array() {
        let app = test_app();

        let response = app
            .oneshot(Request::get("/api/task").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(body_string(response).await, "[]");
    }

    #[tokio::test]
    async fn created_task_shows_up_in_the_list() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/task",
                r#"{"task":"buy milk","is_done":false}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Task updated successfully");

        assert_eq!(
            list_json(&app).await,
            serde_json::json!([{"id": 1, "task": "buy milk", "is_done": false}])
        );
    }

    #[tokio::test]
    async fn update_overwrites_both_fields_and_keeps_the_id() {
        let app = test_app();

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/task",
                r#"{"task":"buy milk","is_done":false}"#,
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/task/1",
                r#"{"task":"buy milk","is_done":true}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Task updated successfully");

        assert_eq!(
            list_json(&app).await,
            serde_json::json!([{"id": 1, "task": "buy milk", "is_done": true}])
        );
    }

    #[tokio::test]
    async fn update_on_missing_id_is_400_and_leaves_store_unchanged() {
        let app = test_app();

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/task",
                r#"{"task":"keep me","is_done":false}"#,
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/task/999",
                r#"{"task":"x","is_done":true}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert_eq!(
            list_json(&app).await,
            serde_json::json!([{"id": 1, "task": "keep me", "is_done": false}])
        );
    }

    #[tokio::test]
    async fn delete_on_missing_id_is_400_and_leaves_store_unchanged() {
        let app = test_app();

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/task",
                r#"{"task":"keep me","is_done":false}"#,
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::delete("/api/task/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(list_json(&app).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleted_task_disappears_from_the_list() {
        let app = test_app();

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/task",
                r#"{"task":"short lived","is_done":false}"#,
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(Request::delete("/api/task/1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Task deleted successfully");

        assert_eq!(list_json(&app).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn malformed_body_is_a_client_error() {
        let app = test_app();

        let response = app
            .oneshot(json_request("POST", "/api/task", "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_client_error() {
        let app = test_app();

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/task/abc",
                r#"{"task":"x","is_done":true}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn signed_ids_are_client_errors() {
        let app = test_app();

        for path in ["/api/task/-1", "/api/task/+1"] {
            let response = app
                .clone()
                .oneshot(Request::delete(path).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn absent_payload_fields_default_to_zero_values() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/task", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            list_json(&app).await,
            serde_json::json!([{"id": 1, "task": "", "is_done": false}])
        );
    }
}
