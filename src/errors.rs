//! Error types for the QueryHaus crate
//!
//! This module contains all error types that can be returned by QueryHaus operations.

use config::ConfigError;
use query_object::QueryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryHausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
