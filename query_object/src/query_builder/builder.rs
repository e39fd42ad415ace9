//! SELECT statement builder
//!
//! ```ignore
//! let m = EntityPath::aliased("member", "m");
//! let t = EntityPath::aliased("team", "t");
//! let query = SelectQuery::select([m.column("username"), t.column("name")])
//!     .from(&m)
//!     .left_join(&t, m.column("team_id").eq_expr(t.column("team_id")))
//!     .where_opt(m.column("age").goe_opt(age_goe))
//!     .order_by(m.column("age").desc())
//!     .offset(1)
//!     .limit(2);
//! ```

use crate::errors::QueryError;
use crate::predicate::{compose, Condition, OptionalConditionExt};
use crate::query_builder::aggregation::SelectItem;
use crate::query_builder::expr::Expr;
use crate::query_builder::grouping::GroupBy;
use crate::query_builder::join::{JoinClause, JoinType};
use crate::query_builder::ordering::OrderSpec;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::path::EntityPath;
use crate::query_builder::sql_generation::{SqlGenerator, Statement};

/// Query builder for SELECT statements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    pub(crate) distinct: bool,
    pub(crate) projection: Vec<SelectItem>,
    pub(crate) from: Vec<EntityPath>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) condition: Option<Condition>,
    pub(crate) group_by: Option<GroupBy>,
    pub(crate) order_by: Vec<OrderSpec>,
    pub(crate) pagination: Pagination,
    /// Builder misuse detected before rendering
    pub(crate) build_error: Option<String>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a query with the given projection
    pub fn select<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SelectItem>,
    {
        Self {
            projection: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// `SELECT alias.* FROM entity`
    pub fn select_from(entity: &EntityPath) -> Self {
        Self::select([entity.all_columns()]).from(entity)
    }

    /// Add one projection item
    pub fn column(mut self, item: impl Into<SelectItem>) -> Self {
        self.projection.push(item.into());
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Add a FROM entry; several entries form a theta join
    pub fn from(mut self, entity: &EntityPath) -> Self {
        self.from.push(entity.clone());
        self
    }

    // ----------------------------------------
    // Joins
    // ----------------------------------------

    pub fn join_clause(mut self, join: JoinClause) -> Self {
        self.joins.push(join);
        self
    }

    pub fn join(self, target: &EntityPath, on: Condition) -> Self {
        self.join_clause(JoinClause::new(JoinType::Inner, target.clone(), on))
    }

    pub fn inner_join(self, target: &EntityPath, on: Condition) -> Self {
        self.join(target, on)
    }

    pub fn left_join(self, target: &EntityPath, on: Condition) -> Self {
        self.join_clause(JoinClause::new(JoinType::Left, target.clone(), on))
    }

    pub fn right_join(self, target: &EntityPath, on: Condition) -> Self {
        self.join_clause(JoinClause::new(JoinType::Right, target.clone(), on))
    }

    pub fn full_join(self, target: &EntityPath, on: Condition) -> Self {
        self.join_clause(JoinClause::new(JoinType::Full, target.clone(), on))
    }

    pub fn cross_join(self, target: &EntityPath) -> Self {
        self.join_clause(JoinClause::cross(target.clone()))
    }

    /// AND an extra filter into the ON clause of the most recent join
    pub fn on(mut self, condition: Condition) -> Self {
        match self.joins.pop() {
            Some(last) => self.joins.push(last.and_on(condition)),
            None => {
                self.build_error = Some("ON clause without a preceding JOIN".to_string());
            }
        }
        self
    }

    // ----------------------------------------
    // Filtering
    // ----------------------------------------

    /// AND a condition into WHERE
    pub fn where_(self, condition: Condition) -> Self {
        self.where_opt(Some(condition))
    }

    /// AND a condition into WHERE; `None` leaves the query unchanged
    pub fn where_opt(mut self, condition: Option<Condition>) -> Self {
        self.condition = self.condition.take().and_then_opt(condition);
        self
    }

    /// AND every present condition into WHERE, ignoring absent ones
    pub fn filter_all<I>(self, conditions: I) -> Self
    where
        I: IntoIterator<Item = Option<Condition>>,
    {
        self.where_opt(compose(conditions))
    }

    pub fn group_by<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let exprs: Vec<Expr> = exprs.into_iter().map(Into::into).collect();
        match self.group_by.as_mut() {
            Some(group) => group.exprs.extend(exprs),
            None => self.group_by = Some(GroupBy::new(exprs)),
        }
        self
    }

    pub fn having(mut self, condition: Condition) -> Self {
        match self.group_by.take() {
            Some(group) => self.group_by = Some(group.having(condition)),
            None => {
                self.build_error = Some("HAVING without GROUP BY".to_string());
            }
        }
        self
    }

    // ----------------------------------------
    // Ordering and paging
    // ----------------------------------------

    pub fn order_by(mut self, spec: OrderSpec) -> Self {
        self.order_by.push(spec);
        self
    }

    pub fn order_by_all<I: IntoIterator<Item = OrderSpec>>(mut self, specs: I) -> Self {
        self.order_by.extend(specs);
        self
    }

    /// Zero-based row offset
    pub fn offset(mut self, offset: i64) -> Self {
        self.pagination = self.pagination.with_offset(offset);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.pagination = self.pagination.with_limit(limit);
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    // ----------------------------------------
    // Accessors
    // ----------------------------------------

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn projection(&self) -> &[SelectItem] {
        &self.projection
    }

    /// The same query counting rows instead of returning them
    pub fn count_query(&self) -> CountQuery {
        let mut query = self.clone();
        query.order_by.clear();
        query.pagination = Pagination::default();
        CountQuery { query }
    }

    pub fn build(&self) -> Result<Statement, QueryError> {
        SqlGenerator::render_select(self)
    }
}

/// Total-row count of a select, ignoring ordering and paging
#[derive(Debug, Clone, PartialEq)]
pub struct CountQuery {
    pub(crate) query: SelectQuery,
}

impl CountQuery {
    /// DISTINCT and GROUP BY change what a row is, so the count wraps the query
    pub fn needs_subquery(&self) -> bool {
        self.query.distinct || self.query.group_by.is_some()
    }

    pub fn build(&self) -> Result<Statement, QueryError> {
        SqlGenerator::render_count(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> EntityPath {
        EntityPath::aliased("member", "m")
    }

    #[test]
    fn test_where_calls_are_and_ed() {
        let m = member();
        let query = SelectQuery::select_from(&m)
            .where_(m.column("username").eq("member1"))
            .where_opt(None)
            .where_(m.column("age").eq(10));

        assert_eq!(
            query.condition(),
            Some(&m.column("username").eq("member1").and(m.column("age").eq(10)))
        );
    }

    #[test]
    fn test_filter_all_ignores_absent_conditions() {
        let m = member();
        let query = SelectQuery::select_from(&m).filter_all([
            m.column("username").eq_opt(None::<&str>),
            m.column("age").eq_opt(Some(10)),
        ]);

        assert_eq!(query.condition(), Some(&m.column("age").eq(10)));

        let unfiltered = SelectQuery::select_from(&m).filter_all([
            m.column("username").eq_opt(None::<&str>),
            m.column("age").eq_opt(None::<i32>),
        ]);
        assert_eq!(unfiltered.condition(), None);
    }

    #[test]
    fn test_count_query_drops_ordering_and_paging() {
        let m = member();
        let query = SelectQuery::select_from(&m)
            .order_by(m.column("username").desc())
            .offset(1)
            .limit(2);

        let count = query.count_query();
        assert!(count.query.order_by.is_empty());
        assert!(count.query.pagination.is_empty());
        assert!(!count.needs_subquery());
        assert!(query.distinct().count_query().needs_subquery());
    }

    #[test]
    fn test_on_without_join_is_recorded() {
        let m = member();
        let query = SelectQuery::select_from(&m).on(m.column("age").eq(10));
        assert!(query.build_error.is_some());

        let grouped = SelectQuery::select_from(&m).having(Expr::count_all().gt_expr(Expr::value(1)));
        assert!(grouped.build_error.is_some());
    }
}
