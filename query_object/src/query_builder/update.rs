//! Bulk UPDATE and DELETE statements
//!
//! Bulk statements go straight to the database. Rows already loaded by the
//! caller are not touched, so re-query after executing one.

use crate::errors::QueryError;
use crate::predicate::{compose, Condition, OptionalConditionExt};
use crate::query_builder::expr::{ArithmeticOperator, Expr};
use crate::query_builder::path::EntityPath;
use crate::query_builder::sql_generation::{SqlGenerator, Statement};
use serde_json::Value;

/// Type of update operation to perform on a field
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOperation {
    /// Set field to a specific value: field = $N
    Set(Value),

    /// Set field to an arbitrary expression: field = <expr>
    SetExpr(Expr),

    /// Apply arithmetic against the current value: field = field + $N
    Arithmetic {
        operator: ArithmeticOperator,
        value: Value,
    },
}

/// Ordered list of column assignments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    pub operations: Vec<(String, UpdateOperation)>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigning a column twice keeps its position and the latest operation
    fn push(mut self, field: impl Into<String>, operation: UpdateOperation) -> Self {
        let field = field.into();
        match self.operations.iter_mut().find(|(name, _)| *name == field) {
            Some(existing) => existing.1 = operation,
            None => self.operations.push((field, operation)),
        }
        self
    }

    pub fn set(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, UpdateOperation::Set(value.into()))
    }

    pub fn set_expr(self, field: impl Into<String>, expr: Expr) -> Self {
        self.push(field, UpdateOperation::SetExpr(expr))
    }

    pub fn increment(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arithmetic(field, ArithmeticOperator::Add, value)
    }

    pub fn decrement(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arithmetic(field, ArithmeticOperator::Subtract, value)
    }

    pub fn multiply(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arithmetic(field, ArithmeticOperator::Multiply, value)
    }

    pub fn divide(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arithmetic(field, ArithmeticOperator::Divide, value)
    }

    fn arithmetic(
        self,
        field: impl Into<String>,
        operator: ArithmeticOperator,
        value: impl Into<Value>,
    ) -> Self {
        self.push(
            field,
            UpdateOperation::Arithmetic {
                operator,
                value: value.into(),
            },
        )
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }
}

/// `UPDATE table SET ... WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    pub(crate) target: EntityPath,
    pub(crate) set: UpdateSet,
    pub(crate) condition: Option<Condition>,
}

impl UpdateQuery {
    pub fn new(target: &EntityPath) -> Self {
        Self {
            target: target.clone(),
            set: UpdateSet::new(),
            condition: None,
        }
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set = self.set.set(field, value);
        self
    }

    /// e.g. `set_expr("age", m.column("age").add(1))`
    pub fn set_expr(mut self, field: impl Into<String>, expr: Expr) -> Self {
        self.set = self.set.set_expr(field, expr);
        self
    }

    pub fn increment(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set = self.set.increment(field, value);
        self
    }

    pub fn decrement(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set = self.set.decrement(field, value);
        self
    }

    pub fn multiply(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set = self.set.multiply(field, value);
        self
    }

    pub fn divide(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set = self.set.divide(field, value);
        self
    }

    pub fn with_set(mut self, set: UpdateSet) -> Self {
        self.set = set;
        self
    }

    pub fn where_(self, condition: Condition) -> Self {
        self.where_opt(Some(condition))
    }

    pub fn where_opt(mut self, condition: Option<Condition>) -> Self {
        self.condition = self.condition.take().and_then_opt(condition);
        self
    }

    pub fn filter_all<I>(self, conditions: I) -> Self
    where
        I: IntoIterator<Item = Option<Condition>>,
    {
        self.where_opt(compose(conditions))
    }

    pub fn target(&self) -> &EntityPath {
        &self.target
    }

    pub fn build(&self) -> Result<Statement, QueryError> {
        SqlGenerator::render_update(self)
    }
}

/// `DELETE FROM table WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    pub(crate) target: EntityPath,
    pub(crate) condition: Option<Condition>,
}

impl DeleteQuery {
    pub fn new(target: &EntityPath) -> Self {
        Self {
            target: target.clone(),
            condition: None,
        }
    }

    pub fn where_(self, condition: Condition) -> Self {
        self.where_opt(Some(condition))
    }

    pub fn where_opt(mut self, condition: Option<Condition>) -> Self {
        self.condition = self.condition.take().and_then_opt(condition);
        self
    }

    pub fn filter_all<I>(self, conditions: I) -> Self
    where
        I: IntoIterator<Item = Option<Condition>>,
    {
        self.where_opt(compose(conditions))
    }

    pub fn target(&self) -> &EntityPath {
        &self.target
    }

    pub fn build(&self) -> Result<Statement, QueryError> {
        SqlGenerator::render_delete(self)
    }
}
