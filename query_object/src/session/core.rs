use crate::errors::QueryError;
use crate::query_builder::{DeleteQuery, QueryResults, SelectQuery, Statement, UpdateQuery};
use crate::session::binding::{bind_all, bind_all_as, bind_all_scalar};
use config::QueryConfig;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres};

/// Executes built statements against a pool
///
/// A session is cheap to create and holds no state besides the pool handle
/// and the query settings; make one per unit of work and pass it down.
#[derive(Debug, Clone)]
pub struct Session<'p> {
    pool: &'p PgPool,
    config: QueryConfig,
}

impl<'p> Session<'p> {
    pub fn new(pool: &'p PgPool) -> Self {
        Self::with_config(pool, QueryConfig::default())
    }

    pub fn with_config(pool: &'p PgPool, config: QueryConfig) -> Self {
        Self { pool, config }
    }

    pub fn pool(&self) -> &'p PgPool {
        self.pool
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn log_statement(&self, tag: &str, statement: &Statement) {
        if self.config.log_statements {
            tracing::info!("[{}] SQL: {}", tag, statement.sql);
        } else {
            tracing::debug!("[{}] SQL: {}", tag, statement.sql);
        }
        #[cfg(feature = "debug-logging")]
        tracing::trace!("[{}] params: {:?}", tag, statement.params);
    }

    async fn fetch_statement<T>(&self, statement: &Statement) -> Result<Vec<T>, QueryError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let query = bind_all_as(sqlx::query_as::<Postgres, T>(&statement.sql), &statement.params);
        let rows = query.fetch_all(self.pool).await.map_err(|e| {
            tracing::warn!("[FETCH] failed: {}", e);
            QueryError::query_execution(&statement.sql, e)
        })?;
        tracing::debug!("[FETCH] rows: {}", rows.len());
        Ok(rows)
    }

    /// All rows of the query
    pub async fn fetch<T>(&self, query: &SelectQuery) -> Result<Vec<T>, QueryError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let statement = query.build()?;
        self.log_statement("FETCH", &statement);
        self.fetch_statement(&statement).await
    }

    /// Exactly one row; none is `NotFound`, several is `NonUnique`
    pub async fn fetch_one<T>(&self, query: &SelectQuery) -> Result<T, QueryError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        self.fetch_optional(query)
            .await?
            .ok_or_else(|| QueryError::NotFound("query returned no rows".to_string()))
    }

    /// At most one row; several is `NonUnique`
    pub async fn fetch_optional<T>(&self, query: &SelectQuery) -> Result<Option<T>, QueryError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut rows: Vec<T> = self.fetch(query).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            count => Err(QueryError::NonUnique { count }),
        }
    }

    /// The first row under the query's ordering
    pub async fn fetch_first<T>(&self, query: &SelectQuery) -> Result<Option<T>, QueryError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let limited = query.clone().limit(1);
        let mut rows: Vec<T> = self.fetch(&limited).await?;
        Ok(rows.pop())
    }

    /// Single-column rows decoded straight into `T`
    pub async fn fetch_scalars<T>(&self, query: &SelectQuery) -> Result<Vec<T>, QueryError>
    where
        T: for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres> + Send + Unpin,
        (T,): for<'r> FromRow<'r, PgRow>,
    {
        let statement = query.build()?;
        self.log_statement("FETCH_SCALARS", &statement);
        let query = bind_all_scalar(sqlx::query_scalar::<Postgres, T>(&statement.sql), &statement.params);
        query
            .fetch_all(self.pool)
            .await
            .map_err(|e| QueryError::query_execution(&statement.sql, e))
    }

    /// Row count of the query with ordering and paging removed
    pub async fn fetch_count(&self, query: &SelectQuery) -> Result<i64, QueryError> {
        let statement = query.count_query().build()?;
        self.log_statement("COUNT", &statement);
        let query = bind_all_scalar(sqlx::query_scalar::<Postgres, i64>(&statement.sql), &statement.params);
        query
            .fetch_one(self.pool)
            .await
            .map_err(|e| QueryError::query_execution(&statement.sql, e))
    }

    /// One page of rows plus the total count
    ///
    /// A limit above `max_page_size` is lowered to it.
    pub async fn fetch_results<T>(&self, query: &SelectQuery) -> Result<QueryResults<T>, QueryError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut page = query.clone();
        let pagination = page.pagination();
        if let Some(limit) = pagination.limit {
            if limit > self.config.max_page_size {
                tracing::warn!(
                    "[FETCH_RESULTS] limit {} exceeds max_page_size {}, clamping",
                    limit,
                    self.config.max_page_size
                );
                page = page.limit(self.config.max_page_size);
            }
        }

        let total = self.fetch_count(&page).await?;
        let pagination = page.pagination();
        let offset = pagination.offset.unwrap_or(0);
        let results = if total == 0 || offset >= total {
            Vec::new()
        } else {
            self.fetch(&page).await?
        };
        Ok(QueryResults::new(results, total, pagination.limit, offset))
    }

    async fn execute_statement(&self, tag: &str, statement: &Statement) -> Result<u64, QueryError> {
        self.log_statement(tag, statement);
        let result = bind_all(sqlx::query(&statement.sql), &statement.params)
            .execute(self.pool)
            .await
            .map_err(|e| {
                tracing::warn!("[{}] failed: {}", tag, e);
                QueryError::query_execution(&statement.sql, e)
            })?;
        tracing::debug!("[{}] rows affected: {}", tag, result.rows_affected());
        Ok(result.rows_affected())
    }

    /// Bulk update; returns the number of rows changed
    pub async fn execute_update(&self, update: &UpdateQuery) -> Result<u64, QueryError> {
        let statement = update.build()?;
        self.execute_statement("UPDATE_WHERE", &statement).await
    }

    /// Bulk delete; returns the number of rows removed
    pub async fn execute_delete(&self, delete: &DeleteQuery) -> Result<u64, QueryError> {
        let statement = delete.build()?;
        self.execute_statement("DELETE_WHERE", &statement).await
    }

    /// Run an already rendered statement, e.g. an INSERT
    pub async fn fetch_statement_one<T>(&self, statement: &Statement) -> Result<T, QueryError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        self.log_statement("STATEMENT", statement);
        let mut rows: Vec<T> = self.fetch_statement(statement).await?;
        match rows.len() {
            1 => rows
                .pop()
                .ok_or_else(|| QueryError::NotFound("statement returned no rows".to_string())),
            0 => Err(QueryError::NotFound("statement returned no rows".to_string())),
            count => Err(QueryError::NonUnique { count }),
        }
    }

    /// Unparameterised SQL such as DDL
    pub async fn execute_raw(&self, sql: &str) -> Result<u64, QueryError> {
        let statement = Statement {
            sql: sql.to_string(),
            params: Vec::new(),
        };
        self.execute_statement("RAW", &statement).await
    }
}
