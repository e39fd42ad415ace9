use crate::predicate::Condition;
use crate::query_builder::expr::Expr;

/// Represents a GROUP BY clause with optional HAVING conditions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupBy {
    /// Expressions to group by
    pub exprs: Vec<Expr>,
    /// Filter applied to grouped rows
    pub having: Option<Condition>,
}

impl GroupBy {
    pub fn new(exprs: Vec<Expr>) -> Self {
        Self {
            exprs,
            having: None,
        }
    }

    pub fn single(expr: Expr) -> Self {
        Self::new(vec![expr])
    }

    /// Add a HAVING condition; repeated calls are AND-ed
    pub fn having(mut self, condition: Condition) -> Self {
        self.having = Some(match self.having.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    pub fn has_having(&self) -> bool {
        self.having.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_single() {
        let group_by = GroupBy::single(Expr::column("name"));

        assert_eq!(group_by.exprs, vec![Expr::column("name")]);
        assert_eq!(group_by.having, None);
        assert!(!group_by.has_having());
    }

    #[test]
    fn test_group_by_having_chain() {
        let group_by = GroupBy::single(Expr::column("name"))
            .having(Expr::count_all().gt_expr(Expr::value(1)))
            .having(Expr::column("age").avg().lt(100));

        assert!(group_by.has_having());
        match group_by.having {
            Some(Condition::Group { conditions, .. }) => assert_eq!(conditions.len(), 2),
            other => panic!("Expected AND group, got {:?}", other),
        }
    }
}
