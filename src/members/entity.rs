//! `Team` and `Member` tables

use query_object::query_builder::EntityPath;
use query_object::traits::Entity;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    #[sqlx(rename = "team_id")]
    pub id: i64,
    pub name: String,
}

impl Team {
    /// Unsaved team; the id is assigned on insert
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

impl Entity for Team {
    type Id = i64;

    fn table_name() -> &'static str {
        "team"
    }

    fn default_alias() -> &'static str {
        "t"
    }

    fn primary_key_field() -> &'static str {
        "team_id"
    }

    fn table_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("team_id", "BIGSERIAL PRIMARY KEY"),
            ("name", "VARCHAR(255) NOT NULL"),
        ]
    }

    fn insert_fields() -> Vec<&'static str> {
        vec!["name"]
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![json!(self.name)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    #[sqlx(rename = "member_id")]
    pub id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
}

impl Member {
    /// Unsaved member without a team
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            id: 0,
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    pub fn with_team(mut self, team: &Team) -> Self {
        self.team_id = Some(team.id);
        self
    }

    /// Member row with a NULL username
    pub fn anonymous(age: i32) -> Self {
        Self {
            id: 0,
            username: None,
            age,
            team_id: None,
        }
    }
}

impl Entity for Member {
    type Id = i64;

    fn table_name() -> &'static str {
        "member"
    }

    fn default_alias() -> &'static str {
        "m"
    }

    fn primary_key_field() -> &'static str {
        "member_id"
    }

    fn table_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("member_id", "BIGSERIAL PRIMARY KEY"),
            ("username", "VARCHAR(255)"),
            ("age", "INTEGER NOT NULL"),
            ("team_id", "BIGINT REFERENCES team (team_id)"),
        ]
    }

    fn insert_fields() -> Vec<&'static str> {
        vec!["username", "age", "team_id"]
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![json!(self.username), json!(self.age), json!(self.team_id)]
    }

    fn create_indexes_sql() -> Vec<String> {
        vec!["CREATE INDEX IF NOT EXISTS idx_member_team_id ON member (team_id)".to_string()]
    }
}

/// `member m`
pub fn member() -> EntityPath {
    Member::path()
}

/// `team t`
pub fn team() -> EntityPath {
    Team::path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_insert_statement() {
        let team = Team {
            id: 7,
            name: "teamA".to_string(),
        };
        let statement = Member::new("member1", 10)
            .with_team(&team)
            .insert_statement()
            .unwrap();

        assert_eq!(
            statement.sql,
            "INSERT INTO member (username, age, team_id) VALUES ($1, $2, $3) RETURNING *"
        );
        assert_eq!(statement.params, vec![json!("member1"), json!(10), json!(7)]);
    }

    #[test]
    fn test_anonymous_member_inlines_nulls() {
        let statement = Member::anonymous(100).insert_statement().unwrap();
        assert_eq!(
            statement.sql,
            "INSERT INTO member (username, age, team_id) VALUES (NULL, $1, NULL) RETURNING *"
        );
    }

    #[test]
    fn test_create_table_order() {
        assert!(Team::create_table_sql().starts_with("CREATE TABLE IF NOT EXISTS team (team_id"));
        assert!(Member::create_table_sql().contains("team_id BIGINT REFERENCES team (team_id)"));
        assert_eq!(member().alias(), "m");
        assert_eq!(team().alias(), "t");
    }
}
