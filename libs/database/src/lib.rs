//! PostgreSQL connectivity for the products service.
//!
//! The process opens exactly one pooled [`DatabaseConnection`](sea_orm::DatabaseConnection) at
//! startup and hands clones of it to every repository; clones share the same pool.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_with_retry(config, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "products_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
