//! ORDER BY items

use crate::query_builder::expr::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Where NULLs sort relative to other values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    First,
    Last,
}

impl NullOrdering {
    pub fn to_sql(&self) -> &'static str {
        match self {
            NullOrdering::First => "NULLS FIRST",
            NullOrdering::Last => "NULLS LAST",
        }
    }
}

/// One ORDER BY item; without explicit null ordering the database default applies
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpec {
    pub expr: Expr,
    pub order: SortOrder,
    pub nulls: Option<NullOrdering>,
}

impl OrderSpec {
    pub fn new(expr: Expr, order: SortOrder) -> Self {
        Self {
            expr,
            order,
            nulls: None,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullOrdering::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullOrdering::Last);
        self
    }
}
