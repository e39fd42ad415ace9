//! Typed SQL construction
//!
//! Paths and expressions produce conditions, conditions feed statements, and
//! [`SqlGenerator`] turns statements into PostgreSQL text plus bound values.

pub mod aggregation;
pub mod builder;
pub mod case;
pub mod expr;
pub mod grouping;
pub mod join;
pub mod ordering;
pub mod pagination;
pub mod path;
pub mod sql_generation;
pub mod update;



pub use aggregation::{AggregateFunction, SelectItem};
pub use builder::{CountQuery, SelectQuery};
pub use case::{CaseBuilder, CaseExpr, CaseWhen};
pub use expr::{ArithmeticOperator, ColumnPath, Expr, SqlType};
pub use grouping::GroupBy;
pub use join::{JoinClause, JoinType};
pub use ordering::{NullOrdering, OrderSpec, SortOrder};
pub use pagination::{Pagination, QueryResults};
pub use path::EntityPath;
pub use sql_generation::{SqlGenerator, Statement};
pub use update::{DeleteQuery, UpdateOperation, UpdateQuery, UpdateSet};
