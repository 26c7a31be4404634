use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use core_config::AppInfo;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Liveness endpoint at `/health`.
///
/// Reports the binary's identity without touching any backing service;
/// readiness checks that do belong to the application.
pub fn health_router(app: AppInfo) -> Router {
    Router::new().route(
        "/health",
        get(move || async move {
            (
                StatusCode::OK,
                Json(HealthResponse {
                    status: "ok",
                    name: app.name,
                    version: app.version,
                }),
            )
                .into_response()
        }),
    )
}
