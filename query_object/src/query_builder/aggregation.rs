use crate::query_builder::expr::Expr;

/// Represents SQL aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    /// COUNT(*) or COUNT(field)
    Count,
    /// SUM(field)
    Sum,
    /// AVG(field)
    Avg,
    /// MIN(field)
    Min,
    /// MAX(field)
    Max,
    /// COUNT(DISTINCT field)
    CountDistinct,
}

impl AggregateFunction {
    /// Convert aggregate function to SQL string
    pub fn to_sql(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
            AggregateFunction::CountDistinct => "COUNT",
        }
    }

    /// Check if this is a DISTINCT aggregate
    pub fn is_distinct(&self) -> bool {
        matches!(self, AggregateFunction::CountDistinct)
    }
}

/// One entry of a SELECT list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// SELECT *
    All,
    /// SELECT alias.*
    AllOf(String),
    /// SELECT expr [AS alias]
    Expr { expr: Expr, alias: Option<String> },
}

impl SelectItem {
    pub fn expr(expr: Expr) -> Self {
        SelectItem::Expr { expr, alias: None }
    }

    /// Output columns are matched to DTO fields by this name
    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        SelectItem::Expr {
            expr,
            alias: Some(alias.into()),
        }
    }

    /// Add an alias to this select item
    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        match self {
            SelectItem::Expr { expr, .. } => SelectItem::Expr {
                expr,
                alias: Some(alias.into()),
            },
            other => other,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            SelectItem::Expr { alias, .. } => alias.as_deref(),
            _ => None,
        }
    }
}

impl From<Expr> for SelectItem {
    fn from(expr: Expr) -> Self {
        SelectItem::expr(expr)
    }
}
