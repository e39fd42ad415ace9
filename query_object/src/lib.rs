//! Query Object - predicate composition and typed query building for QueryHaus
//!
//! This crate provides the building blocks for dynamic searches: optional
//! criteria folded into conditions, a typed SELECT/UPDATE/DELETE builder that
//! renders parameterised PostgreSQL, and a session that executes the result.

pub mod errors;
pub mod predicate;
pub mod prelude;
pub mod query_builder;
pub mod repository;
pub mod session;
pub mod traits;
pub mod validation;

pub use errors::QueryError;
pub use predicate::{compose, compose_any, Condition, ConditionBuilder, SearchCriterion};
pub use query_builder::{
    CaseBuilder, DeleteQuery, EntityPath, Expr, OrderSpec, Pagination, QueryResults, SelectItem,
    SelectQuery, SortOrder, Statement, UpdateQuery, UpdateSet,
};
pub use repository::Repository;
pub use session::Session;
pub use traits::*;
pub use validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

use sqlx::PgPool;

pub type DbPool = PgPool;
