use super::core::Repository;
use crate::errors::QueryError;
use crate::predicate::Condition;
use crate::query_builder::{DeleteQuery, UpdateQuery, UpdateSet};
use crate::traits::{Entity, EntityStore};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
impl<T> EntityStore for Repository<T>
where
    T: Entity + 'static,
{
    type Model = T;

    async fn save(&self, model: &Self::Model) -> Result<Self::Model, QueryError> {
        let statement = model.insert_statement()?;
        let saved = self.session().fetch_statement_one(&statement).await?;
        tracing::debug!("[SAVE] inserted into {}", T::table_name());
        Ok(saved)
    }

    async fn find_by_id(
        &self,
        id: <Self::Model as Entity>::Id,
    ) -> Result<Option<Self::Model>, QueryError> {
        let path = T::path();
        let query = T::select_all().where_(path.column(T::primary_key_field()).eq(id));
        self.session().fetch_optional(&query).await
    }

    async fn find_all(&self) -> Result<Vec<Self::Model>, QueryError> {
        let path = T::path();
        let query = T::select_all().order_by(path.column(T::primary_key_field()).asc());
        self.session().fetch(&query).await
    }

    async fn find_by(&self, field: &str, value: Value) -> Result<Vec<Self::Model>, QueryError> {
        let path = T::path();
        let query = T::select_all()
            .where_(path.column(field).eq(value))
            .order_by(path.column(T::primary_key_field()).asc());
        self.session().fetch(&query).await
    }

    async fn search(&self, condition: Option<Condition>) -> Result<Vec<Self::Model>, QueryError> {
        let path = T::path();
        let query = T::select_all()
            .where_opt(condition)
            .order_by(path.column(T::primary_key_field()).asc());
        self.session().fetch(&query).await
    }

    async fn count(&self, condition: Option<Condition>) -> Result<i64, QueryError> {
        let query = T::select_all().where_opt(condition);
        self.session().fetch_count(&query).await
    }

    async fn update_where(
        &self,
        set: UpdateSet,
        condition: Option<Condition>,
    ) -> Result<u64, QueryError> {
        let update = UpdateQuery::new(&T::path())
            .with_set(set)
            .where_opt(condition);
        self.session().execute_update(&update).await
    }

    async fn delete_where(&self, condition: Option<Condition>) -> Result<u64, QueryError> {
        let delete = DeleteQuery::new(&T::path()).where_opt(condition);
        self.session().execute_delete(&delete).await
    }
}
