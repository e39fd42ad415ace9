//! Core QueryHaus functionality
//!
//! This module contains the main QueryHaus struct: a connection pool plus the
//! query settings every session and repository inherits.

use sqlx::PgPool;
use std::time::Duration;

use crate::errors::QueryHausError;
use config::{AppConfig, DatabaseConfig, QueryConfig};
use query_object::traits::Entity;
use query_object::{Repository, Session};

/// Main QueryHaus handle owning the database pool
#[derive(Debug, Clone)]
pub struct QueryHaus {
    pool: PgPool,
    query_config: QueryConfig,
}

impl QueryHaus {
    /// Create new QueryHaus with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, QueryHausError> {
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        crate::debug_log!("[CONNECT] pool ready for {}:{}", config.host, config.port);

        Ok(Self::from_pool(pool))
    }

    /// Connect using both sections of an application config
    pub async fn from_config(config: AppConfig) -> Result<Self, QueryHausError> {
        let haus = Self::new(config.database).await?;
        Ok(haus.with_query_config(config.query))
    }

    /// Wrap an existing pool with default query settings
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            query_config: QueryConfig::default(),
        }
    }

    pub fn with_query_config(mut self, query_config: QueryConfig) -> Self {
        self.query_config = query_config;
        self
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn query_config(&self) -> &QueryConfig {
        &self.query_config
    }

    /// Execution context for ad-hoc queries
    pub fn session(&self) -> Session<'_> {
        Session::with_config(&self.pool, self.query_config.clone())
    }

    /// Repository for one entity sharing this pool
    pub fn repository<T: Entity>(&self) -> Repository<T> {
        Repository::with_config(self.pool.clone(), self.query_config.clone())
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), QueryHausError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
