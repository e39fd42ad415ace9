//! # QueryHaus
//!
//! Dynamic search queries for PostgreSQL: optional criteria compose into a
//! single filter, a typed builder renders it into parameterised SQL, and a
//! session executes it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use queryhaus::prelude::*;
//! use queryhaus::members::{Member, MemberRepository, MemberSearchCondition, Team};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "queryhaus".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let haus = QueryHaus::new(config).await?;
//!     haus.auto_migrate::<Team>(false).await?;
//!     haus.auto_migrate::<Member>(false).await?;
//!
//!     let members = MemberRepository::from_repository(haus.repository::<Member>());
//!     let condition = MemberSearchCondition::new().age_goe(35).age_loe(40);
//!     for row in members.search(&condition).await? {
//!         println!("{:?} ({}) in {:?}", row.username, row.age, row.team_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod members;
pub mod migration;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::QueryHaus;
pub use crate::errors::QueryHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, QueryConfig};

// Re-export internal crates used by the public API
pub use query_object;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
