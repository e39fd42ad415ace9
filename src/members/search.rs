//! Member search criteria
//!
//! Each optional input of a member search maps to exactly one comparison.
//! Absent inputs (and blank names) add nothing to the filter, so an empty
//! search condition selects every member.

use super::entity::{member, team};
use query_object::errors::QueryError;
use query_object::predicate::{CompareOperator, Condition, SearchCriterion, compose};
use query_object::query_builder::Expr;
use serde::{Deserialize, Serialize};

/// Supported member search criteria
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberCriterion {
    Username(Option<String>),
    TeamName(Option<String>),
    Age(Option<i32>),
    AgeGoe(Option<i32>),
    AgeLoe(Option<i32>),
}

impl MemberCriterion {
    pub fn operator(&self) -> CompareOperator {
        match self {
            Self::Username(_) | Self::TeamName(_) | Self::Age(_) => CompareOperator::Eq,
            Self::AgeGoe(_) => CompareOperator::Gte,
            Self::AgeLoe(_) => CompareOperator::Lte,
        }
    }

    pub fn column(&self) -> Expr {
        match self {
            Self::Username(_) => member().column("username"),
            Self::TeamName(_) => team().column("name"),
            Self::Age(_) | Self::AgeGoe(_) | Self::AgeLoe(_) => member().column("age"),
        }
    }

    fn value(&self) -> Option<Expr> {
        match self {
            Self::Username(name) | Self::TeamName(name) => name
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(Expr::value),
            Self::Age(age) | Self::AgeGoe(age) | Self::AgeLoe(age) => age.map(Expr::value),
        }
    }
}

impl SearchCriterion for MemberCriterion {
    fn to_condition(&self) -> Option<Condition> {
        self.value()
            .map(|value| Condition::compare(self.column(), self.operator(), value))
    }
}

/// Optional inputs of a member search
///
/// `team_name` filters on the joined team, so queries using it must join
/// `team t`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// Criteria in the order they appear in the generated WHERE clause
    pub fn criteria(&self) -> [MemberCriterion; 4] {
        [
            MemberCriterion::Username(self.username.clone()),
            MemberCriterion::TeamName(self.team_name.clone()),
            MemberCriterion::AgeGoe(self.age_goe),
            MemberCriterion::AgeLoe(self.age_loe),
        ]
    }

    /// Reject ranges no member can satisfy
    pub fn validate(&self) -> Result<(), QueryError> {
        for (name, age) in [("age_goe", self.age_goe), ("age_loe", self.age_loe)] {
            if let Some(age) = age {
                if age < 0 {
                    return Err(QueryError::Validation(format!(
                        "{} must not be negative, got {}",
                        name, age
                    )));
                }
            }
        }
        if let (Some(goe), Some(loe)) = (self.age_goe, self.age_loe) {
            if goe > loe {
                return Err(QueryError::Validation(format!(
                    "age_goe ({}) is greater than age_loe ({})",
                    goe, loe
                )));
            }
        }
        Ok(())
    }
}

impl SearchCriterion for MemberSearchCondition {
    fn to_condition(&self) -> Option<Condition> {
        compose(self.criteria().iter().map(SearchCriterion::to_condition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_operators() {
        assert_eq!(MemberCriterion::Username(None).operator(), CompareOperator::Eq);
        assert_eq!(MemberCriterion::Age(None).operator(), CompareOperator::Eq);
        assert_eq!(MemberCriterion::TeamName(None).operator(), CompareOperator::Eq);
        assert_eq!(MemberCriterion::AgeGoe(None).operator(), CompareOperator::Gte);
        assert_eq!(MemberCriterion::AgeLoe(None).operator(), CompareOperator::Lte);
    }

    #[test]
    fn test_absent_and_blank_criteria_add_nothing() {
        assert_eq!(MemberCriterion::Username(None).to_condition(), None);
        assert_eq!(MemberCriterion::Username(Some("  ".into())).to_condition(), None);
        assert_eq!(MemberCriterion::AgeGoe(None).to_condition(), None);
        assert_eq!(MemberSearchCondition::new().to_condition(), None);
    }

    #[test]
    fn test_single_criterion_is_plain_comparison() {
        let condition = MemberSearchCondition::new().age_goe(35).to_condition();
        assert_eq!(condition, Some(member().column("age").goe(35)));
    }

    #[test]
    fn test_full_condition_follows_fixed_order() {
        let condition = MemberSearchCondition::new()
            .age_loe(40)
            .team_name("teamB")
            .age_goe(35)
            .username("member4")
            .to_condition();

        let expected = member()
            .column("username")
            .eq("member4")
            .and(team().column("name").eq("teamB"))
            .and(member().column("age").goe(35))
            .and(member().column("age").loe(40));
        assert_eq!(condition, Some(expected));
    }

    #[test]
    fn test_validate() {
        assert!(MemberSearchCondition::new().validate().is_ok());
        assert!(
            MemberSearchCondition::new()
                .age_goe(20)
                .age_loe(20)
                .validate()
                .is_ok()
        );
        assert!(matches!(
            MemberSearchCondition::new().age_goe(40).age_loe(35).validate(),
            Err(QueryError::Validation(_))
        ));
        assert!(matches!(
            MemberSearchCondition::new().age_loe(-1).validate(),
            Err(QueryError::Validation(_))
        ));
    }

    #[test]
    fn test_deserialize_partial_condition() {
        let condition: MemberSearchCondition =
            serde_json::from_str(r#"{"team_name": "teamB", "age_goe": 35}"#).unwrap();
        assert_eq!(condition, MemberSearchCondition::new().team_name("teamB").age_goe(35));
    }
}
