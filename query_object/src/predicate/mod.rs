//! Composable filter predicates
//!
//! - [`Condition`]: the boolean expression tree, with AND/OR/NOT combinators
//!   and `&`, `|`, `!` operators
//! - [`compose`] / [`ConditionBuilder`]: fold optional conditions, skipping
//!   absent ones
//! - [`Condition::evaluate`] / [`filter_rows`] / [`filter_records`]: evaluate
//!   against JSON rows or serializable records without a database

pub mod compose;
pub mod condition;
pub mod eval;


pub use compose::{compose, compose_any, compose_criteria, ConditionBuilder, SearchCriterion};
pub use condition::{CompareOperator, Condition, LogicalOperator, OptionalConditionExt};
pub use eval::{filter_records, filter_rows};
