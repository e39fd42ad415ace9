use crate::errors::QueryError;
use crate::predicate::Condition;
use crate::query_builder::UpdateSet;
use crate::traits::entity::Entity;
use async_trait::async_trait;
use serde_json::Value;

/// Persistence operations available for every entity
///
/// Filters are `Option<Condition>`: `None` means no filtering, so
/// `delete_where(None)` clears the table.
#[async_trait]
pub trait EntityStore: Send + Sync {
    type Model: Entity;

    /// Insert a new row and return it as stored
    async fn save(&self, model: &Self::Model) -> Result<Self::Model, QueryError>;

    async fn find_by_id(
        &self,
        id: <Self::Model as Entity>::Id,
    ) -> Result<Option<Self::Model>, QueryError>;

    async fn find_all(&self) -> Result<Vec<Self::Model>, QueryError>;

    /// Rows whose `field` equals `value`
    async fn find_by(&self, field: &str, value: Value) -> Result<Vec<Self::Model>, QueryError>;

    async fn search(&self, condition: Option<Condition>) -> Result<Vec<Self::Model>, QueryError>;

    async fn count(&self, condition: Option<Condition>) -> Result<i64, QueryError>;

    /// Bulk update; returns the number of rows changed
    async fn update_where(
        &self,
        set: UpdateSet,
        condition: Option<Condition>,
    ) -> Result<u64, QueryError>;

    /// Bulk delete; returns the number of rows removed
    async fn delete_where(&self, condition: Option<Condition>) -> Result<u64, QueryError>;
}
