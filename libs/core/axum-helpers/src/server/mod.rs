//! Server infrastructure: router assembly, liveness endpoints, and
//! startup with graceful shutdown.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_router, serve};
pub use health::{health_router, HealthResponse};
pub use shutdown::shutdown_signal;
