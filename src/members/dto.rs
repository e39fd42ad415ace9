//! Row shapes for member projections

use serde::{Deserialize, Serialize};

/// `username, age` projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

/// The member projection under different column names (`username AS name`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: i32,
}

/// One row of a member search: the member plus its team, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}
