//! Boolean conditions
//!
//! A `Condition` is an immutable tree. Combinators that take a required
//! operand take a `Condition`; the ones that tolerate absence take an
//! `Option<Condition>` and treat `None` as "no constraint".

use crate::query_builder::builder::SelectQuery;
use crate::query_builder::expr::Expr;
use std::ops::{BitAnd, BitOr, Not};

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOperator {
    Eq,    // =
    Ne,    // !=
    Gt,    // >
    Gte,   // >=
    Lt,    // <
    Lte,   // <=
    Like,  // LIKE
    ILike, // ILIKE (case insensitive)
}

impl CompareOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            CompareOperator::Eq => "=",
            CompareOperator::Ne => "!=",
            CompareOperator::Gt => ">",
            CompareOperator::Gte => ">=",
            CompareOperator::Lt => "<",
            CompareOperator::Lte => "<=",
            CompareOperator::Like => "LIKE",
            CompareOperator::ILike => "ILIKE",
        }
    }
}

/// Logical operators for combining conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        left: Expr,
        operator: CompareOperator,
        right: Expr,
    },
    /// Inclusive on both ends
    Between { expr: Expr, low: Expr, high: Expr },
    InList {
        expr: Expr,
        values: Vec<Expr>,
        negated: bool,
    },
    InSubquery {
        expr: Expr,
        subquery: Box<SelectQuery>,
        negated: bool,
    },
    IsNull { expr: Expr, negated: bool },
    Group {
        operator: LogicalOperator,
        conditions: Vec<Condition>,
    },
    Not(Box<Condition>),
    /// `1=1` or `1=0`
    Constant(bool),
}

impl Condition {
    pub fn compare(left: Expr, operator: CompareOperator, right: Expr) -> Self {
        Condition::Compare {
            left,
            operator,
            right,
        }
    }

    pub fn always_true() -> Self {
        Condition::Constant(true)
    }

    pub fn always_false() -> Self {
        Condition::Constant(false)
    }

    /// AND of every condition; an empty input renders as `1=1`
    pub fn all<I: IntoIterator<Item = Condition>>(conditions: I) -> Self {
        Condition::Group {
            operator: LogicalOperator::And,
            conditions: conditions.into_iter().collect(),
        }
    }

    /// OR of every condition; an empty input renders as `1=0`
    pub fn any<I: IntoIterator<Item = Condition>>(conditions: I) -> Self {
        Condition::Group {
            operator: LogicalOperator::Or,
            conditions: conditions.into_iter().collect(),
        }
    }

    fn combine(self, operator: LogicalOperator, other: Condition) -> Self {
        let mut conditions = match self {
            Condition::Group {
                operator: existing,
                conditions,
            } if existing == operator => conditions,
            single => vec![single],
        };
        match other {
            Condition::Group {
                operator: existing,
                conditions: more,
            } if existing == operator => conditions.extend(more),
            single => conditions.push(single),
        }
        Condition::Group {
            operator,
            conditions,
        }
    }

    /// `self AND other`, flattening nested AND groups
    pub fn and(self, other: Condition) -> Self {
        self.combine(LogicalOperator::And, other)
    }

    /// `self OR other`, flattening nested OR groups
    pub fn or(self, other: Condition) -> Self {
        self.combine(LogicalOperator::Or, other)
    }

    /// `self AND other`, or `self` unchanged when `other` is absent
    pub fn and_opt(self, other: Option<Condition>) -> Self {
        match other {
            Some(other) => self.and(other),
            None => self,
        }
    }

    /// `self OR other`, or `self` unchanged when `other` is absent
    pub fn or_opt(self, other: Option<Condition>) -> Self {
        match other {
            Some(other) => self.or(other),
            None => self,
        }
    }

    pub fn negate(self) -> Self {
        match self {
            Condition::Not(inner) => *inner,
            other => Condition::Not(Box::new(other)),
        }
    }

    /// Number of leaf predicates in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            Condition::Group { conditions, .. } => conditions.iter().map(|c| c.leaf_count()).sum(),
            Condition::Not(inner) => inner.leaf_count(),
            _ => 1,
        }
    }
}

impl BitAnd for Condition {
    type Output = Condition;

    fn bitand(self, rhs: Condition) -> Condition {
        self.and(rhs)
    }
}

impl BitOr for Condition {
    type Output = Condition;

    fn bitor(self, rhs: Condition) -> Condition {
        self.or(rhs)
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        self.negate()
    }
}

/// Absence-aware combination of optional conditions
pub trait OptionalConditionExt {
    /// AND, where an absent side contributes nothing
    fn and_then_opt(self, other: Option<Condition>) -> Option<Condition>;

    /// OR, where an absent side contributes nothing
    fn or_else_opt(self, other: Option<Condition>) -> Option<Condition>;
}

impl OptionalConditionExt for Option<Condition> {
    fn and_then_opt(self, other: Option<Condition>) -> Option<Condition> {
        match (self, other) {
            (Some(left), Some(right)) => Some(left.and(right)),
            (Some(left), None) => Some(left),
            (None, right) => right,
        }
    }

    fn or_else_opt(self, other: Option<Condition>) -> Option<Condition> {
        match (self, other) {
            (Some(left), Some(right)) => Some(left.or(right)),
            (Some(left), None) => Some(left),
            (None, right) => right,
        }
    }
}
