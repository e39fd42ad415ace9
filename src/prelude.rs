//! Convenience re-exports for common QueryHaus usage
//!
//! # Example
//!
//! ```rust
//! use queryhaus::prelude::*;
//!
//! let m = EntityPath::aliased("member", "m");
//! let filter = compose([m.column("age").goe_opt(Some(20)), m.column("username").eq_opt(None::<&str>)]);
//! let query = SelectQuery::select_from(&m).where_opt(filter);
//! assert_eq!(query.build().unwrap().sql, "SELECT m.* FROM member AS m WHERE m.age >= $1");
//! ```

// Core QueryHaus components
pub use crate::core::QueryHaus;
pub use crate::errors::QueryHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, QueryConfig};

// Re-export commonly used query-object types
pub use query_object::prelude::*;

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;
