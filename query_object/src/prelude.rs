//! Convenience re-exports for common query-object usage

// Predicates
pub use crate::predicate::{
    compose, compose_any, filter_records, filter_rows, Condition, ConditionBuilder, OptionalConditionExt,
    SearchCriterion,
};

// Query building
pub use crate::query_builder::{
    CaseBuilder, DeleteQuery, EntityPath, Expr, JoinType, NullOrdering, OrderSpec, Pagination,
    QueryResults, SelectItem, SelectQuery, SortOrder, SqlType, Statement, UpdateQuery, UpdateSet,
};

// Execution
pub use crate::repository::Repository;
pub use crate::session::Session;
pub use crate::traits::{Entity, EntityStore};

// Error types
pub use crate::errors::QueryError;

// Validation
pub use crate::validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::{FromRow, PgPool, Row};
