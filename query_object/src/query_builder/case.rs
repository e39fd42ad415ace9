//! CASE expressions
//!
//! Two shapes are supported:
//! - simple: `CASE m.age WHEN 10 THEN 'ten' ELSE 'other' END`, started with
//!   [`Expr::when`]
//! - searched: `CASE WHEN m.age BETWEEN 0 AND 20 THEN ... END`, started with
//!   [`CaseBuilder::new`]
//!
//! The builders are typestate-like: `when` returns a pending branch that
//! only offers `then`, so a branch can never be left without a result.

use crate::predicate::Condition;
use crate::query_builder::expr::Expr;
use serde_json::Value;

/// What a branch tests
#[derive(Debug, Clone, PartialEq)]
pub enum CaseWhen {
    /// Compared against the CASE operand
    Value(Expr),
    /// Evaluated on its own
    Condition(Condition),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseBranch {
    pub when: CaseWhen,
    pub then: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub operand: Option<Expr>,
    pub branches: Vec<CaseBranch>,
    pub otherwise: Option<Expr>,
}

impl CaseExpr {
    pub(crate) fn simple(operand: Expr) -> Self {
        Self {
            operand: Some(operand),
            branches: Vec::new(),
            otherwise: None,
        }
    }

    pub(crate) fn searched() -> Self {
        Self {
            operand: None,
            branches: Vec::new(),
            otherwise: None,
        }
    }
}

/// A simple CASE waiting for the result of its latest WHEN
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCaseWhen {
    case: CaseExpr,
    when: Expr,
}

impl SimpleCaseWhen {
    pub(crate) fn new(case: CaseExpr, when: Expr) -> Self {
        Self { case, when }
    }

    pub fn then(self, result: impl Into<Value>) -> SimpleCase {
        self.then_expr(Expr::Value(result.into()))
    }

    pub fn then_expr(mut self, result: Expr) -> SimpleCase {
        self.case.branches.push(CaseBranch {
            when: CaseWhen::Value(self.when),
            then: result,
        });
        SimpleCase { case: self.case }
    }
}

/// A simple CASE with at least one complete branch
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCase {
    case: CaseExpr,
}

impl SimpleCase {
    pub fn when(self, value: impl Into<Value>) -> SimpleCaseWhen {
        SimpleCaseWhen::new(self.case, Expr::Value(value.into()))
    }

    pub fn otherwise(self, result: impl Into<Value>) -> Expr {
        self.otherwise_expr(Expr::Value(result.into()))
    }

    pub fn otherwise_expr(mut self, result: Expr) -> Expr {
        self.case.otherwise = Some(result);
        Expr::Case(Box::new(self.case))
    }

    /// Finish without ELSE; unmatched rows yield NULL
    pub fn end(self) -> Expr {
        Expr::Case(Box::new(self.case))
    }
}

/// Builder for searched CASE expressions
#[derive(Debug, Clone, PartialEq)]
pub struct CaseBuilder {
    case: CaseExpr,
}

impl Default for CaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CaseBuilder {
    pub fn new() -> Self {
        Self {
            case: CaseExpr::searched(),
        }
    }

    pub fn when(self, condition: Condition) -> SearchedCaseWhen {
        SearchedCaseWhen {
            case: self.case,
            condition,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchedCaseWhen {
    case: CaseExpr,
    condition: Condition,
}

impl SearchedCaseWhen {
    pub fn then(self, result: impl Into<Value>) -> SearchedCase {
        self.then_expr(Expr::Value(result.into()))
    }

    pub fn then_expr(mut self, result: Expr) -> SearchedCase {
        self.case.branches.push(CaseBranch {
            when: CaseWhen::Condition(self.condition),
            then: result,
        });
        SearchedCase { case: self.case }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchedCase {
    case: CaseExpr,
}

impl SearchedCase {
    pub fn when(self, condition: Condition) -> SearchedCaseWhen {
        SearchedCaseWhen {
            case: self.case,
            condition,
        }
    }

    pub fn otherwise(self, result: impl Into<Value>) -> Expr {
        self.otherwise_expr(Expr::Value(result.into()))
    }

    pub fn otherwise_expr(mut self, result: Expr) -> Expr {
        self.case.otherwise = Some(result);
        Expr::Case(Box::new(self.case))
    }

    pub fn end(self) -> Expr {
        Expr::Case(Box::new(self.case))
    }
}
