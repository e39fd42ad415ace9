use crate::predicate::Condition;
use crate::query_builder::path::EntityPath;

/// Represents the type of SQL JOIN operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN - returns records that have matching values in both tables
    Inner,
    /// LEFT JOIN - returns all records from the left table and matched records from the right table
    Left,
    /// RIGHT JOIN - returns all records from the right table and matched records from the left table
    Right,
    /// FULL OUTER JOIN - returns all records when there is a match in either left or right table
    Full,
    /// CROSS JOIN - returns Cartesian product of both tables
    Cross,
}

impl JoinType {
    /// Convert JoinType to SQL string
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL OUTER JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

/// Represents a complete JOIN clause
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub target: EntityPath,
    /// Required for every join type except CROSS
    pub on: Option<Condition>,
}

impl JoinClause {
    pub fn new(join_type: JoinType, target: EntityPath, on: Condition) -> Self {
        Self {
            join_type,
            target,
            on: Some(on),
        }
    }

    pub fn cross(target: EntityPath) -> Self {
        Self {
            join_type: JoinType::Cross,
            target,
            on: None,
        }
    }

    /// AND an extra filter into the ON clause
    pub fn and_on(mut self, condition: Condition) -> Self {
        self.on = Some(match self.on.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }
}
