//! Scalar expressions
//!
//! `Expr` is everything that can appear where SQL expects a value: columns,
//! bound parameters, aggregates, scalar subqueries, `CASE`, function calls,
//! concatenation, casts and arithmetic. Comparison methods on `Expr` produce
//! [`Condition`]s; the `*_opt` variants produce `Option<Condition>` and are the
//! building blocks of dynamic search criteria.

use crate::predicate::{CompareOperator, Condition};
use crate::query_builder::aggregation::{AggregateFunction, SelectItem};
use crate::query_builder::builder::SelectQuery;
use crate::query_builder::case::{CaseExpr, SimpleCaseWhen};
use crate::query_builder::ordering::{OrderSpec, SortOrder};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

/// A possibly qualified column reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnPath {
    pub qualifier: Option<String>,
    pub name: String,
}

impl ColumnPath {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
        }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Subtract => "-",
            ArithmeticOperator::Multiply => "*",
            ArithmeticOperator::Divide => "/",
        }
    }
}

/// Target types for `CAST`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    BigInt,
    Double,
    Numeric,
    Timestamptz,
    Uuid,
}

impl SqlType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Double => "DOUBLE PRECISION",
            SqlType::Numeric => "NUMERIC",
            SqlType::Timestamptz => "TIMESTAMPTZ",
            SqlType::Uuid => "UUID",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(ColumnPath),
    /// Rendered as a bound parameter (`NULL` is rendered inline)
    Value(Value),
    /// `None` argument means `*`
    Aggregate {
        function: AggregateFunction,
        arg: Option<Box<Expr>>,
    },
    Subquery(Box<SelectQuery>),
    Case(Box<CaseExpr>),
    Function {
        name: String,
        args: Vec<Expr>,
    },
    Concat(Vec<Expr>),
    Cast {
        expr: Box<Expr>,
        sql_type: SqlType,
    },
    Binary {
        left: Box<Expr>,
        operator: ArithmeticOperator,
        right: Box<Expr>,
    },
}

impl From<ColumnPath> for Expr {
    fn from(column: ColumnPath) -> Self {
        Expr::Column(column)
    }
}

impl From<SelectQuery> for Expr {
    fn from(query: SelectQuery) -> Self {
        Expr::Subquery(Box::new(query))
    }
}

impl Expr {
    /// Unqualified column
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(ColumnPath::new(name))
    }

    /// Bound parameter or constant
    pub fn value(value: impl Into<Value>) -> Self {
        Expr::Value(value.into())
    }

    /// Timestamp parameter, bound as text and cast to `TIMESTAMPTZ`
    pub fn timestamp(value: DateTime<Utc>) -> Self {
        Expr::value(value.to_rfc3339_opts(SecondsFormat::Micros, true))
            .cast(SqlType::Timestamptz)
    }

    /// UUID parameter, bound as text and cast to `UUID`
    pub fn uuid(value: Uuid) -> Self {
        Expr::value(value.hyphenated().to_string()).cast(SqlType::Uuid)
    }

    /// Scalar subquery
    pub fn subquery(query: SelectQuery) -> Self {
        Expr::Subquery(Box::new(query))
    }

    /// Call a SQL function by name, e.g. `regexp_replace`
    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    // ----------------------------------------
    // Comparisons against values
    // ----------------------------------------

    fn compare_value(self, operator: CompareOperator, value: Value) -> Condition {
        Condition::compare(self, operator, Expr::Value(value))
    }

    pub fn eq(self, value: impl Into<Value>) -> Condition {
        self.compare_value(CompareOperator::Eq, value.into())
    }

    pub fn ne(self, value: impl Into<Value>) -> Condition {
        self.compare_value(CompareOperator::Ne, value.into())
    }

    pub fn gt(self, value: impl Into<Value>) -> Condition {
        self.compare_value(CompareOperator::Gt, value.into())
    }

    /// Greater than or equal
    pub fn goe(self, value: impl Into<Value>) -> Condition {
        self.compare_value(CompareOperator::Gte, value.into())
    }

    pub fn lt(self, value: impl Into<Value>) -> Condition {
        self.compare_value(CompareOperator::Lt, value.into())
    }

    /// Less than or equal
    pub fn loe(self, value: impl Into<Value>) -> Condition {
        self.compare_value(CompareOperator::Lte, value.into())
    }

    pub fn like(self, pattern: &str) -> Condition {
        self.compare_value(CompareOperator::Like, Value::String(pattern.to_string()))
    }

    pub fn ilike(self, pattern: &str) -> Condition {
        self.compare_value(CompareOperator::ILike, Value::String(pattern.to_string()))
    }

    /// `LIKE '%fragment%'`
    pub fn contains(self, fragment: &str) -> Condition {
        self.like(&format!("%{}%", fragment))
    }

    /// `low <= self <= high`, both ends inclusive
    pub fn between(self, low: impl Into<Value>, high: impl Into<Value>) -> Condition {
        Condition::Between {
            expr: self,
            low: Expr::Value(low.into()),
            high: Expr::Value(high.into()),
        }
    }

    pub fn in_values<I, V>(self, values: I) -> Condition
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Condition::InList {
            expr: self,
            values: values.into_iter().map(|v| Expr::Value(v.into())).collect(),
            negated: false,
        }
    }

    pub fn not_in_values<I, V>(self, values: I) -> Condition
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Condition::InList {
            expr: self,
            values: values.into_iter().map(|v| Expr::Value(v.into())).collect(),
            negated: true,
        }
    }

    pub fn in_subquery(self, query: SelectQuery) -> Condition {
        Condition::InSubquery {
            expr: self,
            subquery: Box::new(query),
            negated: false,
        }
    }

    pub fn not_in_subquery(self, query: SelectQuery) -> Condition {
        Condition::InSubquery {
            expr: self,
            subquery: Box::new(query),
            negated: true,
        }
    }

    pub fn is_null(self) -> Condition {
        Condition::IsNull {
            expr: self,
            negated: false,
        }
    }

    pub fn is_not_null(self) -> Condition {
        Condition::IsNull {
            expr: self,
            negated: true,
        }
    }

    // ----------------------------------------
    // Comparisons against other expressions
    // ----------------------------------------

    /// Column-to-column or column-to-subquery equality, e.g. theta joins
    pub fn eq_expr(self, other: impl Into<Expr>) -> Condition {
        Condition::compare(self, CompareOperator::Eq, other.into())
    }

    pub fn ne_expr(self, other: impl Into<Expr>) -> Condition {
        Condition::compare(self, CompareOperator::Ne, other.into())
    }

    pub fn gt_expr(self, other: impl Into<Expr>) -> Condition {
        Condition::compare(self, CompareOperator::Gt, other.into())
    }

    pub fn goe_expr(self, other: impl Into<Expr>) -> Condition {
        Condition::compare(self, CompareOperator::Gte, other.into())
    }

    pub fn lt_expr(self, other: impl Into<Expr>) -> Condition {
        Condition::compare(self, CompareOperator::Lt, other.into())
    }

    pub fn loe_expr(self, other: impl Into<Expr>) -> Condition {
        Condition::compare(self, CompareOperator::Lte, other.into())
    }

    // ----------------------------------------
    // Optional comparisons: absent value, absent condition
    // ----------------------------------------

    pub fn eq_opt<V: Into<Value>>(self, value: Option<V>) -> Option<Condition> {
        value.map(|v| self.eq(v))
    }

    pub fn ne_opt<V: Into<Value>>(self, value: Option<V>) -> Option<Condition> {
        value.map(|v| self.ne(v))
    }

    pub fn gt_opt<V: Into<Value>>(self, value: Option<V>) -> Option<Condition> {
        value.map(|v| self.gt(v))
    }

    pub fn goe_opt<V: Into<Value>>(self, value: Option<V>) -> Option<Condition> {
        value.map(|v| self.goe(v))
    }

    pub fn lt_opt<V: Into<Value>>(self, value: Option<V>) -> Option<Condition> {
        value.map(|v| self.lt(v))
    }

    pub fn loe_opt<V: Into<Value>>(self, value: Option<V>) -> Option<Condition> {
        value.map(|v| self.loe(v))
    }

    pub fn like_opt(self, pattern: Option<&str>) -> Option<Condition> {
        pattern.map(|p| self.like(p))
    }

    // ----------------------------------------
    // Derived expressions
    // ----------------------------------------

    fn binary(self, operator: ArithmeticOperator, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(self),
            operator,
            right: Box::new(right),
        }
    }

    pub fn add(self, value: impl Into<Value>) -> Expr {
        self.binary(ArithmeticOperator::Add, Expr::Value(value.into()))
    }

    pub fn subtract(self, value: impl Into<Value>) -> Expr {
        self.binary(ArithmeticOperator::Subtract, Expr::Value(value.into()))
    }

    pub fn multiply(self, value: impl Into<Value>) -> Expr {
        self.binary(ArithmeticOperator::Multiply, Expr::Value(value.into()))
    }

    pub fn divide(self, value: impl Into<Value>) -> Expr {
        self.binary(ArithmeticOperator::Divide, Expr::Value(value.into()))
    }

    pub fn add_expr(self, other: impl Into<Expr>) -> Expr {
        self.binary(ArithmeticOperator::Add, other.into())
    }

    /// String concatenation with `||`; chained calls flatten into one list
    pub fn concat(self, other: impl Into<Expr>) -> Expr {
        let other = other.into();
        match self {
            Expr::Concat(mut parts) => {
                parts.push(other);
                Expr::Concat(parts)
            }
            first => Expr::Concat(vec![first, other]),
        }
    }

    /// Concatenate a literal string
    pub fn concat_str(self, literal: &str) -> Expr {
        self.concat(Expr::value(literal))
    }

    pub fn lower(self) -> Expr {
        Expr::function("lower", vec![self])
    }

    pub fn upper(self) -> Expr {
        Expr::function("upper", vec![self])
    }

    pub fn cast(self, sql_type: SqlType) -> Expr {
        Expr::Cast {
            expr: Box::new(self),
            sql_type,
        }
    }

    /// The value rendered as text, for concatenation with strings
    pub fn string_value(self) -> Expr {
        self.cast(SqlType::Text)
    }

    // ----------------------------------------
    // Aggregates
    // ----------------------------------------

    fn aggregate(self, function: AggregateFunction) -> Expr {
        Expr::Aggregate {
            function,
            arg: Some(Box::new(self)),
        }
    }

    /// `COUNT(*)`
    pub fn count_all() -> Expr {
        Expr::Aggregate {
            function: AggregateFunction::Count,
            arg: None,
        }
    }

    pub fn count(self) -> Expr {
        self.aggregate(AggregateFunction::Count)
    }

    pub fn count_distinct(self) -> Expr {
        self.aggregate(AggregateFunction::CountDistinct)
    }

    pub fn sum(self) -> Expr {
        self.aggregate(AggregateFunction::Sum)
    }

    pub fn avg(self) -> Expr {
        self.aggregate(AggregateFunction::Avg)
    }

    pub fn min(self) -> Expr {
        self.aggregate(AggregateFunction::Min)
    }

    pub fn max(self) -> Expr {
        self.aggregate(AggregateFunction::Max)
    }

    // ----------------------------------------
    // Ordering, projection and CASE entry points
    // ----------------------------------------

    pub fn asc(self) -> OrderSpec {
        OrderSpec::new(self, SortOrder::Asc)
    }

    pub fn desc(self) -> OrderSpec {
        OrderSpec::new(self, SortOrder::Desc)
    }

    /// Project this expression under an output name
    pub fn alias(self, name: impl Into<String>) -> SelectItem {
        SelectItem::aliased(self, name)
    }

    /// Start a simple `CASE self WHEN value THEN ...` expression
    pub fn when(self, value: impl Into<Value>) -> SimpleCaseWhen {
        SimpleCaseWhen::new(CaseExpr::simple(self), Expr::Value(value.into()))
    }
}
