//! PostgreSQL connector and utilities on top of SeaORM.
//!
//! Provides pool configuration from the environment, connection with
//! retry/backoff for startup resilience, migration running, and a
//! `SELECT 1` health check for readiness probes.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{connect_from_config_with_retry, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = connect_from_config_with_retry(config, None).await?;
//! database::postgres::run_migrations::<migration::Migrator>(&db, "my_app").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
