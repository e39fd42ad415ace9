//! PostgreSQL text generation
//!
//! Every statement renders to SQL text with `$N` placeholders plus the
//! ordered parameter values. Numbering is shared across subqueries so a
//! whole statement binds in one pass. Identifiers are validated before they
//! are written; values are always bound, except `NULL` which is written
//! inline.

use crate::errors::QueryError;
use crate::predicate::{CompareOperator, Condition, LogicalOperator};
use crate::query_builder::aggregation::{AggregateFunction, SelectItem};
use crate::query_builder::builder::{CountQuery, SelectQuery};
use crate::query_builder::case::{CaseExpr, CaseWhen};
use crate::query_builder::expr::{ColumnPath, Expr};
use crate::query_builder::join::{JoinClause, JoinType};
use crate::query_builder::ordering::OrderSpec;
use crate::query_builder::path::EntityPath;
use crate::query_builder::update::{DeleteQuery, UpdateOperation, UpdateQuery};
use crate::validation::{ValidatedFieldName, ValidatedFunctionName, ValidatedTableName};
use serde_json::Value;

/// Rendered SQL plus the values for its placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

pub struct SqlGenerator {
    params: Vec<Value>,
}

impl SqlGenerator {
    fn new() -> Self {
        Self { params: Vec::new() }
    }

    fn finish(self, sql: String) -> Statement {
        Statement {
            sql,
            params: self.params,
        }
    }

    pub fn render_select(query: &SelectQuery) -> Result<Statement, QueryError> {
        let mut generator = Self::new();
        let sql = generator.select_sql(query)?;
        Ok(generator.finish(sql))
    }

    pub fn render_count(count: &CountQuery) -> Result<Statement, QueryError> {
        let mut generator = Self::new();
        let sql = if count.needs_subquery() {
            let inner = generator.select_sql(&count.query)?;
            format!("SELECT COUNT(*) FROM ({}) AS counted", inner)
        } else {
            let mut query = count.query.clone();
            query.projection = vec![SelectItem::expr(Expr::count_all())];
            generator.select_sql(&query)?
        };
        Ok(generator.finish(sql))
    }

    pub fn render_update(update: &UpdateQuery) -> Result<Statement, QueryError> {
        if update.set.is_empty() {
            return Err(QueryError::invalid_query("UPDATE without any SET assignment"));
        }

        let mut generator = Self::new();
        let mut assignments = Vec::with_capacity(update.set.len());
        for (field, operation) in &update.set.operations {
            let field = ValidatedFieldName::new(field)?;
            let rhs = match operation {
                UpdateOperation::Set(value) => generator.value_sql(value),
                UpdateOperation::SetExpr(expr) => generator.expr_sql(expr)?,
                UpdateOperation::Arithmetic { operator, value } => {
                    let param = generator.value_sql(value);
                    format!("{} {} {}", field, operator.to_sql(), param)
                }
            };
            assignments.push(format!("{} = {}", field, rhs));
        }

        let mut sql = format!(
            "UPDATE {} SET {}",
            Self::table_sql(&update.target)?,
            assignments.join(", ")
        );
        if let Some(condition) = &update.condition {
            sql.push_str(" WHERE ");
            sql.push_str(&generator.where_sql(condition)?);
        }
        Ok(generator.finish(sql))
    }

    pub fn render_delete(delete: &DeleteQuery) -> Result<Statement, QueryError> {
        let mut generator = Self::new();
        let mut sql = format!("DELETE FROM {}", Self::table_sql(&delete.target)?);
        if let Some(condition) = &delete.condition {
            sql.push_str(" WHERE ");
            sql.push_str(&generator.where_sql(condition)?);
        }
        Ok(generator.finish(sql))
    }

    /// `INSERT INTO table (fields) VALUES ($1, ...) RETURNING *`
    pub fn render_insert(
        table: &str,
        fields: &[&str],
        values: Vec<Value>,
    ) -> Result<Statement, QueryError> {
        if fields.len() != values.len() {
            return Err(QueryError::invalid_query(format!(
                "INSERT into {} has {} fields but {} values",
                table,
                fields.len(),
                values.len()
            )));
        }

        let table = ValidatedTableName::new(table)?;
        let fields = fields
            .iter()
            .map(|f| ValidatedFieldName::new(f).map(ValidatedFieldName::into_string))
            .collect::<Result<Vec<_>, _>>()?;
        let mut generator = Self::new();
        let placeholders: Vec<String> = values.iter().map(|v| generator.value_sql(v)).collect();

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
            table,
            fields.join(", "),
            placeholders.join(", ")
        );
        Ok(generator.finish(sql))
    }

    // ----------------------------------------
    // SELECT
    // ----------------------------------------

    fn select_sql(&mut self, query: &SelectQuery) -> Result<String, QueryError> {
        if let Some(error) = &query.build_error {
            return Err(QueryError::invalid_query(error.clone()));
        }
        if query.from.is_empty() {
            return Err(QueryError::invalid_query("SELECT without FROM"));
        }

        let mut sql = String::from("SELECT ");
        if query.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&self.projection_sql(&query.projection)?);

        let from = query
            .from
            .iter()
            .map(Self::table_sql)
            .collect::<Result<Vec<_>, _>>()?;
        sql.push_str(" FROM ");
        sql.push_str(&from.join(", "));

        for join in &query.joins {
            sql.push(' ');
            sql.push_str(&self.join_sql(join)?);
        }

        if let Some(condition) = &query.condition {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_sql(condition)?);
        }

        if let Some(group) = &query.group_by {
            if !group.exprs.is_empty() {
                let exprs = group
                    .exprs
                    .iter()
                    .map(|e| self.expr_sql(e))
                    .collect::<Result<Vec<_>, _>>()?;
                sql.push_str(" GROUP BY ");
                sql.push_str(&exprs.join(", "));
            }
            if let Some(having) = &group.having {
                sql.push_str(" HAVING ");
                sql.push_str(&self.where_sql(having)?);
            }
        }

        if !query.order_by.is_empty() {
            let items = query
                .order_by
                .iter()
                .map(|spec| self.order_sql(spec))
                .collect::<Result<Vec<_>, _>>()?;
            sql.push_str(" ORDER BY ");
            sql.push_str(&items.join(", "));
        }

        let pagination = query.pagination;
        if pagination.limit.is_some_and(|l| l < 0) || pagination.offset.is_some_and(|o| o < 0) {
            return Err(QueryError::invalid_query(format!(
                "LIMIT and OFFSET must not be negative (limit {:?}, offset {:?})",
                pagination.limit, pagination.offset
            )));
        }
        if !pagination.is_empty() {
            sql.push(' ');
            sql.push_str(&pagination.to_sql());
        }

        Ok(sql)
    }

    fn projection_sql(&mut self, items: &[SelectItem]) -> Result<String, QueryError> {
        if items.is_empty() {
            return Ok("*".to_string());
        }

        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            let part = match item {
                SelectItem::All => "*".to_string(),
                SelectItem::AllOf(alias) => format!("{}.*", ValidatedFieldName::new(alias)?),
                SelectItem::Expr { expr, alias } => {
                    let expr = self.expr_sql(expr)?;
                    match alias {
                        Some(alias) => format!("{} AS {}", expr, ValidatedFieldName::new(alias)?),
                        None => expr,
                    }
                }
            };
            parts.push(part);
        }
        Ok(parts.join(", "))
    }

    fn table_sql(entity: &EntityPath) -> Result<String, QueryError> {
        let table = ValidatedTableName::new(entity.table())?;
        if entity.has_alias() {
            let alias = ValidatedFieldName::new(entity.alias())?;
            Ok(format!("{} AS {}", table, alias))
        } else {
            Ok(table.into_string())
        }
    }

    fn join_sql(&mut self, join: &JoinClause) -> Result<String, QueryError> {
        let target = Self::table_sql(&join.target)?;
        match (join.join_type, &join.on) {
            (JoinType::Cross, None) => Ok(format!("{} {}", join.join_type.to_sql(), target)),
            (JoinType::Cross, Some(_)) => Err(QueryError::invalid_query(
                "CROSS JOIN does not take an ON clause",
            )),
            (_, None) => Err(QueryError::invalid_query(format!(
                "{} {} requires an ON clause",
                join.join_type.to_sql(),
                join.target.table()
            ))),
            (join_type, Some(on)) => Ok(format!(
                "{} {} ON {}",
                join_type.to_sql(),
                target,
                self.where_sql(on)?
            )),
        }
    }

    fn order_sql(&mut self, spec: &OrderSpec) -> Result<String, QueryError> {
        let mut sql = format!("{} {}", self.expr_sql(&spec.expr)?, spec.order.to_sql());
        if let Some(nulls) = spec.nulls {
            sql.push(' ');
            sql.push_str(nulls.to_sql());
        }
        Ok(sql)
    }

    // ----------------------------------------
    // Expressions
    // ----------------------------------------

    fn value_sql(&mut self, value: &Value) -> String {
        if value.is_null() {
            return "NULL".to_string();
        }
        self.params.push(value.clone());
        format!("${}", self.params.len())
    }

    fn column_sql(column: &ColumnPath) -> Result<String, QueryError> {
        let name = ValidatedFieldName::new(&column.name)?;
        match &column.qualifier {
            Some(qualifier) => Ok(format!("{}.{}", ValidatedFieldName::new(qualifier)?, name)),
            None => Ok(name.into_string()),
        }
    }

    fn expr_sql(&mut self, expr: &Expr) -> Result<String, QueryError> {
        match expr {
            Expr::Column(column) => Self::column_sql(column),
            Expr::Value(value) => Ok(self.value_sql(value)),
            Expr::Aggregate { function, arg } => self.aggregate_sql(*function, arg.as_deref()),
            Expr::Subquery(query) => Ok(format!("({})", self.select_sql(query)?)),
            Expr::Case(case) => self.case_sql(case),
            Expr::Function { name, args } => {
                let name = ValidatedFunctionName::new(name)?;
                let args = args
                    .iter()
                    .map(|a| self.expr_sql(a))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{}({})", name.as_str(), args.join(", ")))
            }
            Expr::Concat(parts) => match parts.as_slice() {
                [] => Err(QueryError::invalid_query("empty concatenation")),
                [single] => self.expr_sql(single),
                parts => {
                    let parts = parts
                        .iter()
                        .map(|p| self.expr_sql(p))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(format!("({})", parts.join(" || ")))
                }
            },
            Expr::Cast { expr, sql_type } => {
                Ok(format!("CAST({} AS {})", self.expr_sql(expr)?, sql_type.to_sql()))
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.expr_sql(left)?;
                let right = self.expr_sql(right)?;
                Ok(format!("({} {} {})", left, operator.to_sql(), right))
            }
        }
    }

    fn aggregate_sql(
        &mut self,
        function: AggregateFunction,
        arg: Option<&Expr>,
    ) -> Result<String, QueryError> {
        match (function, arg) {
            (AggregateFunction::Count, None) => Ok("COUNT(*)".to_string()),
            (function, None) => Err(QueryError::invalid_query(format!(
                "{} requires an argument",
                function.to_sql()
            ))),
            (function, Some(arg)) => {
                let arg = self.expr_sql(arg)?;
                if function.is_distinct() {
                    Ok(format!("{}(DISTINCT {})", function.to_sql(), arg))
                } else {
                    Ok(format!("{}({})", function.to_sql(), arg))
                }
            }
        }
    }

    fn case_sql(&mut self, case: &CaseExpr) -> Result<String, QueryError> {
        if case.branches.is_empty() {
            return Err(QueryError::invalid_query("CASE without WHEN branches"));
        }

        let mut sql = String::from("CASE");
        if let Some(operand) = &case.operand {
            sql.push(' ');
            sql.push_str(&self.expr_sql(operand)?);
        }

        for branch in &case.branches {
            let when = match (&branch.when, case.operand.is_some()) {
                (CaseWhen::Value(value), true) => self.expr_sql(value)?,
                (CaseWhen::Condition(condition), false) => self.condition_sql(condition)?,
                _ => {
                    return Err(QueryError::invalid_query(
                        "CASE branch does not match the CASE form",
                    ))
                }
            };
            let then = self.expr_sql(&branch.then)?;
            sql.push_str(&format!(" WHEN {} THEN {}", when, then));
        }

        if let Some(otherwise) = &case.otherwise {
            sql.push_str(" ELSE ");
            sql.push_str(&self.expr_sql(otherwise)?);
        }
        sql.push_str(" END");
        Ok(sql)
    }

    // ----------------------------------------
    // Conditions
    // ----------------------------------------

    /// Top-level AND groups need no surrounding parentheses
    fn where_sql(&mut self, condition: &Condition) -> Result<String, QueryError> {
        match condition {
            Condition::Group {
                operator: LogicalOperator::And,
                conditions,
            } if conditions.len() > 1 => self.join_conditions(conditions, LogicalOperator::And),
            other => self.condition_sql(other),
        }
    }

    fn join_conditions(
        &mut self,
        conditions: &[Condition],
        operator: LogicalOperator,
    ) -> Result<String, QueryError> {
        let parts = conditions
            .iter()
            .map(|c| self.condition_sql(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(operator.to_sql()))
    }

    fn condition_sql(&mut self, condition: &Condition) -> Result<String, QueryError> {
        match condition {
            Condition::Compare {
                left,
                operator,
                right,
            } => {
                let left_sql = self.expr_sql(left)?;
                match (operator, right) {
                    (CompareOperator::Eq, Expr::Value(Value::Null)) => {
                        Ok(format!("{} IS NULL", left_sql))
                    }
                    (CompareOperator::Ne, Expr::Value(Value::Null)) => {
                        Ok(format!("{} IS NOT NULL", left_sql))
                    }
                    (operator, right) => {
                        let right_sql = self.expr_sql(right)?;
                        Ok(format!("{} {} {}", left_sql, operator.to_sql(), right_sql))
                    }
                }
            }
            Condition::Between { expr, low, high } => {
                let expr = self.expr_sql(expr)?;
                let low = self.expr_sql(low)?;
                let high = self.expr_sql(high)?;
                Ok(format!("{} BETWEEN {} AND {}", expr, low, high))
            }
            Condition::InList {
                expr,
                values,
                negated,
            } => {
                if values.is_empty() {
                    return Ok(if *negated { "1=1" } else { "1=0" }.to_string());
                }
                let expr = self.expr_sql(expr)?;
                let values = values
                    .iter()
                    .map(|v| self.expr_sql(v))
                    .collect::<Result<Vec<_>, _>>()?;
                let keyword = if *negated { "NOT IN" } else { "IN" };
                Ok(format!("{} {} ({})", expr, keyword, values.join(", ")))
            }
            Condition::InSubquery {
                expr,
                subquery,
                negated,
            } => {
                let expr = self.expr_sql(expr)?;
                let subquery = self.select_sql(subquery)?;
                let keyword = if *negated { "NOT IN" } else { "IN" };
                Ok(format!("{} {} ({})", expr, keyword, subquery))
            }
            Condition::IsNull { expr, negated } => {
                let expr = self.expr_sql(expr)?;
                let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
                Ok(format!("{} {}", expr, keyword))
            }
            Condition::Group {
                operator,
                conditions,
            } => match conditions.as_slice() {
                [] => Ok(match operator {
                    LogicalOperator::And => "1=1",
                    LogicalOperator::Or => "1=0",
                }
                .to_string()),
                [single] => self.condition_sql(single),
                conditions => Ok(format!("({})", self.join_conditions(conditions, *operator)?)),
            },
            Condition::Not(inner) => Ok(format!("NOT ({})", self.condition_sql(inner)?)),
            Condition::Constant(true) => Ok("1=1".to_string()),
            Condition::Constant(false) => Ok("1=0".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::case::CaseBuilder;
    use serde_json::json;

    fn member() -> EntityPath {
        EntityPath::aliased("member", "m")
    }

    fn team() -> EntityPath {
        EntityPath::aliased("team", "t")
    }

    #[test]
    fn test_select_from_with_where_and_paging() {
        let m = member();
        let statement = SelectQuery::select_from(&m)
            .where_(m.column("username").eq("member1"))
            .where_(m.column("age").between(10, 30))
            .order_by(m.column("age").desc())
            .order_by(m.column("username").asc().nulls_last())
            .offset(1)
            .limit(2)
            .build()
            .unwrap();

        assert_eq!(
            statement.sql,
            "SELECT m.* FROM member AS m WHERE m.username = $1 AND m.age BETWEEN $2 AND $3 \
             ORDER BY m.age DESC, m.username ASC NULLS LAST LIMIT 2 OFFSET 1"
        );
        assert_eq!(statement.params, vec![json!("member1"), json!(10), json!(30)]);
    }

    #[test]
    fn test_nested_or_groups_are_parenthesised() {
        let m = member();
        let condition = m
            .column("age")
            .eq(10)
            .or(m.column("age").eq(20))
            .and(m.column("username").is_not_null());
        let statement = SelectQuery::select_from(&m).where_(condition).build().unwrap();

        assert_eq!(
            statement.sql,
            "SELECT m.* FROM member AS m WHERE (m.age = $1 OR m.age = $2) AND m.username IS NOT NULL"
        );
    }

    #[test]
    fn test_null_comparisons_render_inline() {
        let m = member();
        let statement = SelectQuery::select_from(&m)
            .where_(m.column("username").eq(Value::Null))
            .where_(m.column("team_id").ne(Value::Null))
            .build()
            .unwrap();

        assert_eq!(
            statement.sql,
            "SELECT m.* FROM member AS m WHERE m.username IS NULL AND m.team_id IS NOT NULL"
        );
        assert!(statement.params.is_empty());
    }

    #[test]
    fn test_empty_lists_and_groups() {
        let m = member();
        let render = |condition: Condition| {
            SelectQuery::select_from(&m)
                .where_(condition)
                .build()
                .unwrap()
                .sql
        };

        assert!(render(m.column("age").in_values(Vec::<i32>::new())).ends_with("WHERE 1=0"));
        assert!(render(m.column("age").not_in_values(Vec::<i32>::new())).ends_with("WHERE 1=1"));
        assert!(render(Condition::all([])).ends_with("WHERE 1=1"));
        assert!(render(Condition::any([])).ends_with("WHERE 1=0"));
        assert!(render(!m.column("age").eq(10)).ends_with("WHERE NOT (m.age = $1)"));
    }

    #[test]
    fn test_subquery_parameters_share_numbering() {
        let m = member();
        let sub = EntityPath::aliased("member", "member_sub");
        let statement = SelectQuery::select_from(&m)
            .where_(m.column("username").ne("member0"))
            .where_(
                m.column("age").in_subquery(
                    SelectQuery::select([sub.column("age")])
                        .from(&sub)
                        .where_(sub.column("age").gt(10)),
                ),
            )
            .build()
            .unwrap();

        assert_eq!(
            statement.sql,
            "SELECT m.* FROM member AS m WHERE m.username != $1 AND m.age IN \
             (SELECT member_sub.age FROM member AS member_sub WHERE member_sub.age > $2)"
        );
        assert_eq!(statement.params, vec![json!("member0"), json!(10)]);
    }

    #[test]
    fn test_joins_render_with_on_clauses() {
        let m = member();
        let t = team();
        let statement = SelectQuery::select([m.column("username"), t.column("name")])
            .from(&m)
            .left_join(&t, m.column("team_id").eq_expr(t.column("team_id")))
            .on(t.column("name").eq("teamA"))
            .build()
            .unwrap();

        assert_eq!(
            statement.sql,
            "SELECT m.username, t.name FROM member AS m LEFT JOIN team AS t \
             ON m.team_id = t.team_id AND t.name = $1"
        );
    }

    #[test]
    fn test_join_validation() {
        let m = member();
        let t = team();

        let missing_on = SelectQuery::select_from(&m)
            .join_clause(JoinClause {
                join_type: JoinType::Inner,
                target: t.clone(),
                on: None,
            })
            .build();
        assert!(matches!(missing_on, Err(QueryError::InvalidQuery(_))));

        let cross = SelectQuery::select_from(&m).cross_join(&t).build().unwrap();
        assert_eq!(cross.sql, "SELECT m.* FROM member AS m CROSS JOIN team AS t");
    }

    #[test]
    fn test_group_by_having_and_aggregates() {
        let m = member();
        let t = team();
        let statement = SelectQuery::select([
            t.column("name").alias("team_name"),
            m.column("age").avg().cast(crate::query_builder::expr::SqlType::Double).alias("avg_age"),
            Expr::count_all().alias("member_count"),
        ])
        .from(&m)
        .join(&t, m.column("team_id").eq_expr(t.column("team_id")))
        .group_by([t.column("name")])
        .having(Expr::count_all().gt_expr(Expr::value(1)))
        .build()
        .unwrap();

        assert_eq!(
            statement.sql,
            "SELECT t.name AS team_name, CAST(AVG(m.age) AS DOUBLE PRECISION) AS avg_age, \
             COUNT(*) AS member_count FROM member AS m INNER JOIN team AS t ON m.team_id = t.team_id \
             GROUP BY t.name HAVING COUNT(*) > $1"
        );
        assert_eq!(statement.params, vec![json!(1)]);
    }

    #[test]
    fn test_case_rendering() {
        let m = member();
        let simple = SelectQuery::select([m.column("age").when(10).then("ten").otherwise("other")])
            .from(&m)
            .build()
            .unwrap();
        assert_eq!(
            simple.sql,
            "SELECT CASE m.age WHEN $1 THEN $2 ELSE $3 END FROM member AS m"
        );

        let searched = SelectQuery::select([CaseBuilder::new()
            .when(m.column("age").between(0, 20))
            .then("0-20")
            .otherwise("other")])
        .from(&m)
        .build()
        .unwrap();
        assert_eq!(
            searched.sql,
            "SELECT CASE WHEN m.age BETWEEN $1 AND $2 THEN $3 ELSE $4 END FROM member AS m"
        );
    }

    #[test]
    fn test_count_rendering() {
        let m = member();
        let query = SelectQuery::select_from(&m)
            .where_(m.column("age").gt(10))
            .order_by(m.column("age").desc())
            .limit(2);
        assert_eq!(
            query.count_query().build().unwrap().sql,
            "SELECT COUNT(*) FROM member AS m WHERE m.age > $1"
        );

        let distinct = SelectQuery::select([m.column("username")]).from(&m).distinct();
        assert_eq!(
            distinct.count_query().build().unwrap().sql,
            "SELECT COUNT(*) FROM (SELECT DISTINCT m.username FROM member AS m) AS counted"
        );
    }

    #[test]
    fn test_update_and_delete() {
        let m = member();
        let update = UpdateQuery::new(&m)
            .set("username", "non-member")
            .where_(m.column("age").lt(28))
            .build()
            .unwrap();
        assert_eq!(
            update.sql,
            "UPDATE member AS m SET username = $1 WHERE m.age < $2"
        );
        assert_eq!(update.params, vec![json!("non-member"), json!(28)]);

        let increment = UpdateQuery::new(&m).increment("age", 1).build().unwrap();
        assert_eq!(increment.sql, "UPDATE member AS m SET age = age + $1");

        let doubled = UpdateQuery::new(&m)
            .set_expr("age", m.column("age").multiply(2))
            .build()
            .unwrap();
        assert_eq!(doubled.sql, "UPDATE member AS m SET age = (m.age * $1)");

        let empty = UpdateQuery::new(&m).where_(m.column("age").lt(28)).build();
        assert!(matches!(empty, Err(QueryError::InvalidQuery(_))));

        let delete = DeleteQuery::new(&m).where_(m.column("age").gt(18)).build().unwrap();
        assert_eq!(delete.sql, "DELETE FROM member AS m WHERE m.age > $1");
    }

    #[test]
    fn test_identifiers_are_validated() {
        let bad_table = SelectQuery::select_from(&EntityPath::new("member; DROP TABLE x")).build();
        assert!(matches!(bad_table, Err(QueryError::Validation(_))));

        let bad_column = SelectQuery::select([Expr::column("age) FROM pg_user --")])
            .from(&member())
            .build();
        assert!(matches!(bad_column, Err(QueryError::Validation(_))));

        let bad_function = SelectQuery::select([Expr::function("pg_sleep(1);", vec![])])
            .from(&member())
            .build();
        assert!(matches!(bad_function, Err(QueryError::Validation(_))));
    }

    #[test]
    fn test_insert_rendering() {
        let statement = SqlGenerator::render_insert(
            "member",
            &["username", "age", "team_id"],
            vec![json!("member1"), json!(10), Value::Null],
        )
        .unwrap();
        assert_eq!(
            statement.sql,
            "INSERT INTO member (username, age, team_id) VALUES ($1, $2, NULL) RETURNING *"
        );
        assert_eq!(statement.params, vec![json!("member1"), json!(10)]);

        let mismatched = SqlGenerator::render_insert("member", &["username"], vec![]);
        assert!(matches!(mismatched, Err(QueryError::InvalidQuery(_))));
    }

    #[test]
    fn test_negative_paging_is_rejected() {
        let result = SelectQuery::select_from(&member()).limit(-1).build();
        assert!(matches!(result, Err(QueryError::InvalidQuery(_))));
    }
}
