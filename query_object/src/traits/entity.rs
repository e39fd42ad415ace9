//! Table metadata for persisted entities

use crate::errors::QueryError;
use crate::query_builder::{EntityPath, SelectQuery, SqlGenerator, Statement};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use std::fmt::Debug;

/// A row type stored in its own table
///
/// ```ignore
/// impl Entity for Team {
///     type Id = i64;
///
///     fn table_name() -> &'static str { "team" }
///     fn default_alias() -> &'static str { "t" }
///     fn primary_key_field() -> &'static str { "id" }
///     fn table_fields() -> Vec<(&'static str, &'static str)> {
///         vec![("id", "BIGSERIAL PRIMARY KEY"), ("name", "VARCHAR(255) NOT NULL")]
///     }
///     fn insert_fields() -> Vec<&'static str> { vec!["name"] }
///     fn insert_values(&self) -> Vec<Value> { vec![json!(self.name)] }
/// }
/// ```
pub trait Entity:
    Clone + Send + Sync + Debug + Unpin + for<'r> FromRow<'r, PgRow>
{
    /// The type used for the primary key
    type Id: Clone + Send + Sync + Debug + Into<Value>;

    /// The table name in the database
    fn table_name() -> &'static str;

    /// Alias used when the entity appears in a statement
    fn default_alias() -> &'static str;

    fn primary_key_field() -> &'static str;

    /// Column names with their PostgreSQL definitions, in table order
    fn table_fields() -> Vec<(&'static str, &'static str)>;

    /// Columns written on insert; generated columns are left out
    fn insert_fields() -> Vec<&'static str>;

    /// Values for [`Entity::insert_fields`], in the same order
    fn insert_values(&self) -> Vec<Value>;

    fn path() -> EntityPath {
        EntityPath::aliased(Self::table_name(), Self::default_alias())
    }

    /// The entity under another alias, e.g. for a correlated subquery
    fn aliased(alias: &str) -> EntityPath {
        EntityPath::aliased(Self::table_name(), alias)
    }

    /// `SELECT alias.* FROM table alias`
    fn select_all() -> SelectQuery {
        SelectQuery::select_from(&Self::path())
    }

    fn columns() -> Vec<&'static str> {
        Self::table_fields().into_iter().map(|(name, _)| name).collect()
    }

    /// Generate CREATE TABLE SQL statement
    fn create_table_sql() -> String {
        let columns: Vec<String> = Self::table_fields()
            .into_iter()
            .map(|(name, definition)| format!("{} {}", name, definition))
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            Self::table_name(),
            columns.join(", ")
        )
    }

    /// Generate DROP TABLE SQL statement
    fn drop_table_sql() -> String {
        format!("DROP TABLE IF EXISTS {} CASCADE", Self::table_name())
    }

    /// Generate CREATE INDEX SQL statements
    fn create_indexes_sql() -> Vec<String> {
        vec![]
    }

    /// `INSERT ... RETURNING *` for this instance
    fn insert_statement(&self) -> Result<Statement, QueryError> {
        SqlGenerator::render_insert(Self::table_name(), &Self::insert_fields(), self.insert_values())
    }
}
