//! Member queries backing the search screens

use super::dto::MemberTeamDto;
use super::entity::{Member, member, team};
use super::search::MemberSearchCondition;
use query_object::DbPool;
use query_object::errors::QueryError;
use query_object::predicate::SearchCriterion;
use query_object::query_builder::{QueryResults, SelectQuery};
use query_object::repository::Repository;
use query_object::session::Session;
use query_object::traits::EntityStore;

/// Member repository: the generic entity operations plus member searches
#[derive(Debug, Clone)]
pub struct MemberRepository {
    members: Repository<Member>,
}

impl MemberRepository {
    pub fn new(pool: DbPool) -> Self {
        Self::from_repository(Repository::new(pool))
    }

    pub fn from_repository(members: Repository<Member>) -> Self {
        Self { members }
    }

    /// Generic operations (`save`, `find_by_id`, `find_all`, ...)
    pub fn members(&self) -> &Repository<Member> {
        &self.members
    }

    fn session(&self) -> Session<'_> {
        self.members.session()
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, QueryError> {
        self.members.find_by("username", username.into()).await
    }

    /// Members joined with their team and filtered by every present criterion
    pub fn search_query(condition: &MemberSearchCondition) -> SelectQuery {
        let m = member();
        let t = team();
        SelectQuery::select([
            m.column("member_id").alias("member_id"),
            m.column("username").alias("username"),
            m.column("age").alias("age"),
            t.column("team_id").alias("team_id"),
            t.column("name").alias("team_name"),
        ])
        .from(&m)
        .left_join(&t, m.column("team_id").eq_expr(t.column("team_id")))
        .where_opt(condition.to_condition())
        .order_by(m.column("member_id").asc())
    }

    pub async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamDto>, QueryError> {
        condition.validate()?;
        self.session().fetch(&Self::search_query(condition)).await
    }

    /// One page of search results plus the total match count
    ///
    /// `limit` falls back to the configured default page size and is capped
    /// at the configured maximum.
    pub async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        offset: i64,
        limit: Option<i64>,
    ) -> Result<QueryResults<MemberTeamDto>, QueryError> {
        condition.validate()?;
        if offset < 0 {
            return Err(QueryError::Validation(format!(
                "offset must not be negative, got {}",
                offset
            )));
        }
        let limit = self.members.config().clamp_page_size(limit);
        let query = Self::search_query(condition).offset(offset).limit(limit);
        self.session().fetch_results(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_query_without_criteria() {
        let statement = MemberRepository::search_query(&MemberSearchCondition::new())
            .build()
            .unwrap();
        assert_eq!(
            statement.sql,
            "SELECT m.member_id AS member_id, m.username AS username, m.age AS age, \
             t.team_id AS team_id, t.name AS team_name FROM member AS m \
             LEFT JOIN team AS t ON m.team_id = t.team_id ORDER BY m.member_id ASC"
        );
        assert!(statement.params.is_empty());
    }

    #[test]
    fn test_search_query_with_criteria() {
        let condition = MemberSearchCondition::new()
            .team_name("teamB")
            .age_goe(35)
            .age_loe(40);
        let statement = MemberRepository::search_query(&condition).build().unwrap();
        assert!(statement.sql.ends_with(
            "WHERE t.name = $1 AND m.age >= $2 AND m.age <= $3 ORDER BY m.member_id ASC"
        ));
        assert_eq!(statement.params, vec![json!("teamB"), json!(35), json!(40)]);
    }
}
