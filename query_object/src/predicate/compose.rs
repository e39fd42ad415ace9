//! Dynamic predicate composition
//!
//! Search forms hand over a handful of independently optional values. Each
//! one maps to `Option<Condition>`; composing folds the present ones with AND
//! in the caller's order and yields `None` when nothing was supplied, which
//! callers treat as "match every row".

use crate::predicate::condition::{Condition, OptionalConditionExt};

/// A single optional filter input
pub trait SearchCriterion {
    /// The condition this criterion stands for, or `None` when its value is unset
    fn to_condition(&self) -> Option<Condition>;
}

impl SearchCriterion for Condition {
    fn to_condition(&self) -> Option<Condition> {
        Some(self.clone())
    }
}

impl SearchCriterion for Option<Condition> {
    fn to_condition(&self) -> Option<Condition> {
        self.clone()
    }
}

impl<T: SearchCriterion + ?Sized> SearchCriterion for &T {
    fn to_condition(&self) -> Option<Condition> {
        (**self).to_condition()
    }
}

/// AND together the present conditions, skipping absent ones
///
/// A single present condition is returned as is, not wrapped in a group.
pub fn compose<I>(conditions: I) -> Option<Condition>
where
    I: IntoIterator<Item = Option<Condition>>,
{
    conditions
        .into_iter()
        .fold(None, |acc, next| acc.and_then_opt(next))
}

/// OR together the present conditions, skipping absent ones
pub fn compose_any<I>(conditions: I) -> Option<Condition>
where
    I: IntoIterator<Item = Option<Condition>>,
{
    conditions
        .into_iter()
        .fold(None, |acc, next| acc.or_else_opt(next))
}

pub fn compose_criteria(criteria: &[&dyn SearchCriterion]) -> Option<Condition> {
    compose(criteria.iter().map(|criterion| criterion.to_condition()))
}

/// Mutable accumulator for conditions assembled step by step
///
/// ```ignore
/// let mut builder = ConditionBuilder::new();
/// builder.and(username.map(|u| member.username().eq(u)));
/// builder.and(age.map(|a| member.age().eq(a)));
/// let filter = builder.build();
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionBuilder {
    condition: Option<Condition>,
}

impl ConditionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an initial condition
    pub fn with(condition: Condition) -> Self {
        Self {
            condition: Some(condition),
        }
    }

    pub fn and(&mut self, condition: Option<Condition>) -> &mut Self {
        self.condition = self.condition.take().and_then_opt(condition);
        self
    }

    pub fn or(&mut self, condition: Option<Condition>) -> &mut Self {
        self.condition = self.condition.take().or_else_opt(condition);
        self
    }

    pub fn and_not(&mut self, condition: Option<Condition>) -> &mut Self {
        self.and(condition.map(Condition::negate))
    }

    pub fn has_value(&self) -> bool {
        self.condition.is_some()
    }

    pub fn build(&self) -> Option<Condition> {
        self.condition.clone()
    }

    pub fn into_condition(self) -> Option<Condition> {
        self.condition
    }
}
