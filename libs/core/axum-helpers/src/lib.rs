//! Shared HTTP plumbing for API binaries.
//!
//! Provides the application error type with its HTTP status mapping,
//! router assembly with OpenAPI documentation and common middleware,
//! liveness endpoints, and server startup with graceful shutdown.

pub mod errors;
pub mod server;

pub use errors::AppError;
pub use server::{create_router, health_router, serve, shutdown_signal};
