use std::time::Duration;

use axum_helpers::server::{create_router, health_router, serve};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_tasks::{handlers, PgTaskRepository, TaskService};
use tracing::info;

mod config;
mod ready;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre before any fallible operation
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to database...");
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    // Apply the schema before serving any traffic; failure here is fatal
    database::postgres::run_migrations::<migration::Migrator>(&db, "tasklist_api")
        .await
        .map_err(|e| eyre::eyre!("Schema migration failed: {}", e))?;

    let repository = PgTaskRepository::new(db.clone());
    let service = TaskService::new(repository);

    let api_routes = axum::Router::new().nest("/task", handlers::router(service));
    let router = create_router::<handlers::ApiDoc>(api_routes);

    let app = router
        .merge(health_router(config.app))
        .merge(ready::router(db.clone()));

    serve(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connection");
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Tasklist API shutdown complete");
    Ok(())
}
