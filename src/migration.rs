//! Database migration functionality
//!
//! Table creation for entities managed by QueryHaus.

use crate::core::QueryHaus;
use crate::errors::QueryHausError;
use query_object::QueryError;
use query_object::traits::Entity;

impl QueryHaus {
    /// Create the table and indexes for an entity
    /// If recreate is true, drops the existing table first
    pub async fn auto_migrate<T>(&self, recreate: bool) -> Result<(), QueryHausError>
    where
        T: Entity,
    {
        let table_name = T::table_name();

        if recreate {
            let drop_sql = T::drop_table_sql();
            tracing::debug!("[MIGRATE] Dropping table with SQL: {}", drop_sql);
            self.execute_ddl(table_name, "drop_table", &drop_sql).await?;
        }

        let create_table_sql = T::create_table_sql();
        tracing::debug!("[MIGRATE] Creating table with SQL: {}", create_table_sql);
        self.execute_ddl(table_name, "create_table", &create_table_sql)
            .await?;

        for index_sql in T::create_indexes_sql() {
            crate::trace_log!("[MIGRATE] Creating index with SQL: {}", index_sql);
            self.execute_ddl(table_name, "create_index", &index_sql)
                .await?;
        }

        Ok(())
    }

    async fn execute_ddl(
        &self,
        table: &str,
        operation: &str,
        sql: &str,
    ) -> Result<(), QueryHausError> {
        sqlx::query(sql)
            .execute(self.pool())
            .await
            .map_err(|e| QueryError::database_operation(table, operation, e))?;
        Ok(())
    }
}
