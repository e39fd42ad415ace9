use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Database error during {operation} on {table}: {source}")]
    Database {
        table: String,
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Query execution failed for `{sql}`: {source}")]
    QueryExecution {
        sql: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Expected at most one row but the query returned {count}")]
    NonUnique { count: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unsupported in-memory evaluation: {0}")]
    Unsupported(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QueryError {
    pub fn database_operation(table: &str, operation: &str, source: sqlx::Error) -> Self {
        Self::Database {
            table: table.to_string(),
            operation: operation.to_string(),
            source,
        }
    }

    pub fn query_execution(sql: &str, source: sqlx::Error) -> Self {
        Self::QueryExecution {
            sql: sql.to_string(),
            source,
        }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}

impl From<ValidationError> for QueryError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error.to_string())
    }
}
