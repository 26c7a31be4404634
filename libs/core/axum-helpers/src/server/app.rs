use std::future::Future;
use std::io;
use std::time::Duration;

use axum::Router;
use core_config::server::ServerConfig;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};
use utoipa::OpenApi;

use super::shutdown::shutdown_signal;
use crate::errors::not_found;

/// Upper bound on any single request, store round trips included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Assemble the application router.
///
/// API routes are nested under `/api`, Swagger UI is mounted at
/// `/swagger-ui`, unmatched paths fall through to a plain-text 404,
/// and request tracing, a request timeout, and response compression
/// are layered on top.
///
/// # Type Parameters
/// * `T` - the `utoipa::OpenApi` document describing the API
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
}

/// Run the server until SIGINT/SIGTERM, then drain in-flight requests
/// and run `cleanup` (bounded by `cleanup_timeout`).
///
/// # Errors
/// Returns an error if the listener fails to bind or the server fails
/// while running.
pub async fn serve<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    info!("Running cleanup tasks (timeout: {:?})", cleanup_timeout);
    if tokio::time::timeout(cleanup_timeout, cleanup).await.is_err() {
        tracing::warn!(
            "Cleanup exceeded timeout of {:?}, exiting anyway",
            cleanup_timeout
        );
    }

    Ok(())
}
