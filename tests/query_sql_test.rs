//! Statement rendering for the member/team search scenarios
//!
//! These tests only build SQL, so they run without a database.

use queryhaus::members::{Member, MemberRepository, MemberSearchCondition, member, team};
use queryhaus::prelude::*;
use serde_json::json;

fn member_sub() -> EntityPath {
    Member::aliased("member_sub")
}

fn team_fk() -> Condition {
    member().column("team_id").eq_expr(team().column("team_id"))
}

// ========================================
// Basic filtering, sorting and paging
// ========================================

#[test]
fn test_find_by_username() {
    let m = member();
    let statement = SelectQuery::select_from(&m)
        .where_(m.column("username").eq("member"))
        .build()
        .unwrap();

    assert_eq!(statement.sql, "SELECT m.* FROM member AS m WHERE m.username = $1");
    assert_eq!(statement.params, vec![json!("member")]);
}

#[test]
fn test_chained_and_separate_where_render_identically() {
    let m = member();
    let chained = SelectQuery::select_from(&m)
        .where_(
            m.column("username")
                .eq("member")
                .and(m.column("age").between(10, 30)),
        )
        .build()
        .unwrap();
    let separate = SelectQuery::select_from(&m)
        .filter_all([
            Some(m.column("username").eq("member")),
            Some(m.column("age").between(10, 30)),
        ])
        .build()
        .unwrap();

    assert_eq!(chained, separate);
    assert_eq!(
        chained.sql,
        "SELECT m.* FROM member AS m WHERE m.username = $1 AND m.age BETWEEN $2 AND $3"
    );
}

#[test]
fn test_sort_with_nulls_last() {
    let m = member();
    let statement = SelectQuery::select_from(&m)
        .where_(m.column("age").goe(100))
        .order_by(m.column("age").desc())
        .order_by(m.column("username").asc().nulls_last())
        .build()
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT m.* FROM member AS m WHERE m.age >= $1 ORDER BY m.age DESC, m.username ASC NULLS LAST"
    );
}

#[test]
fn test_paging_and_count_query() {
    let m = member();
    let query = SelectQuery::select_from(&m)
        .order_by(m.column("username").desc())
        .offset(1)
        .limit(2);

    assert_eq!(
        query.build().unwrap().sql,
        "SELECT m.* FROM member AS m ORDER BY m.username DESC LIMIT 2 OFFSET 1"
    );
    assert_eq!(
        query.count_query().build().unwrap().sql,
        "SELECT COUNT(*) FROM member AS m"
    );
}

// ========================================
// Aggregation and grouping
// ========================================

#[test]
fn test_aggregates() {
    let m = member();
    let statement = SelectQuery::select([
        Expr::count_all(),
        m.column("age").sum(),
        m.column("age").avg(),
        m.column("age").max(),
        m.column("age").min(),
    ])
    .from(&m)
    .build()
    .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT COUNT(*), SUM(m.age), AVG(m.age), MAX(m.age), MIN(m.age) FROM member AS m"
    );
}

#[test]
fn test_average_age_per_team() {
    let (m, t) = (member(), team());
    let query = SelectQuery::select([
        t.column("name").alias("team_name"),
        m.column("age").avg().cast(SqlType::Double).alias("avg_age"),
    ])
    .from(&m)
    .join(&t, team_fk())
    .group_by([t.column("name")])
    .order_by(t.column("name").asc());

    assert_eq!(
        query.build().unwrap().sql,
        "SELECT t.name AS team_name, CAST(AVG(m.age) AS DOUBLE PRECISION) AS avg_age \
         FROM member AS m INNER JOIN team AS t ON m.team_id = t.team_id \
         GROUP BY t.name ORDER BY t.name ASC"
    );
    assert_eq!(
        query.count_query().build().unwrap().sql,
        "SELECT COUNT(*) FROM (SELECT t.name AS team_name, CAST(AVG(m.age) AS DOUBLE PRECISION) AS avg_age \
         FROM member AS m INNER JOIN team AS t ON m.team_id = t.team_id GROUP BY t.name) AS counted"
    );
}

// ========================================
// Joins
// ========================================

#[test]
fn test_members_of_team_a() {
    let (m, t) = (member(), team());
    let statement = SelectQuery::select_from(&m)
        .left_join(&t, team_fk())
        .where_(t.column("name").eq("teamA"))
        .build()
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT m.* FROM member AS m LEFT JOIN team AS t ON m.team_id = t.team_id WHERE t.name = $1"
    );
}

#[test]
fn test_theta_join() {
    let (m, t) = (member(), team());
    let statement = SelectQuery::select_from(&m)
        .from(&t)
        .where_(m.column("username").eq_expr(t.column("name")))
        .build()
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT m.* FROM member AS m, team AS t WHERE m.username = t.name"
    );
    assert!(statement.params.is_empty());
}

#[test]
fn test_join_on_filtering() {
    let (m, t) = (member(), team());
    let statement = SelectQuery::select([m.all_columns(), t.all_columns()])
        .from(&m)
        .left_join(&t, team_fk())
        .on(t.column("name").eq("teamA"))
        .build()
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT m.*, t.* FROM member AS m LEFT JOIN team AS t \
         ON m.team_id = t.team_id AND t.name = $1"
    );
    assert_eq!(statement.params, vec![json!("teamA")]);
}

#[test]
fn test_join_on_unrelated_columns() {
    let (m, t) = (member(), team());
    let statement = SelectQuery::select([m.all_columns(), t.all_columns()])
        .from(&m)
        .left_join(&t, m.column("username").eq_expr(t.column("name")))
        .build()
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT m.*, t.* FROM member AS m LEFT JOIN team AS t ON m.username = t.name"
    );
}

// ========================================
// Subqueries
// ========================================

#[test]
fn test_oldest_member_subquery() {
    let (m, ms) = (member(), member_sub());
    let statement = SelectQuery::select_from(&m)
        .where_(
            m.column("age")
                .eq_expr(SelectQuery::select([ms.column("age").max()]).from(&ms)),
        )
        .build()
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT m.* FROM member AS m WHERE m.age = (SELECT MAX(member_sub.age) FROM member AS member_sub)"
    );
}

#[test]
fn test_above_average_subquery() {
    let (m, ms) = (member(), member_sub());
    let statement = SelectQuery::select_from(&m)
        .where_(
            m.column("age")
                .goe_expr(SelectQuery::select([ms.column("age").avg()]).from(&ms)),
        )
        .build()
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT m.* FROM member AS m WHERE m.age >= (SELECT AVG(member_sub.age) FROM member AS member_sub)"
    );
}

#[test]
fn test_in_subquery_shares_parameter_numbering() {
    let (m, ms) = (member(), member_sub());
    let statement = SelectQuery::select_from(&m)
        .where_(m.column("username").ne("nobody"))
        .where_(
            m.column("age").in_subquery(
                SelectQuery::select([ms.column("age")])
                    .from(&ms)
                    .where_(ms.column("age").gt(10)),
            ),
        )
        .build()
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT m.* FROM member AS m WHERE m.username != $1 AND m.age IN \
         (SELECT member_sub.age FROM member AS member_sub WHERE member_sub.age > $2)"
    );
    assert_eq!(statement.params, vec![json!("nobody"), json!(10)]);
}

#[test]
fn test_subquery_in_projection() {
    let (m, ms) = (member(), member_sub());
    let statement = SelectQuery::select([
        m.column("username").alias("username"),
        Expr::subquery(SelectQuery::select([ms.column("age").avg()]).from(&ms)).alias("avg_age"),
    ])
    .from(&m)
    .build()
    .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT m.username AS username, (SELECT AVG(member_sub.age) FROM member AS member_sub) AS avg_age \
         FROM member AS m"
    );
}

// ========================================
// CASE, constants, concatenation and functions
// ========================================

#[test]
fn test_simple_case() {
    let m = member();
    let statement = SelectQuery::select([m
        .column("age")
        .when(10)
        .then("ten")
        .when(20)
        .then("twenty")
        .otherwise("other")])
    .from(&m)
    .build()
    .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT CASE m.age WHEN $1 THEN $2 WHEN $3 THEN $4 ELSE $5 END FROM member AS m"
    );
    assert_eq!(
        statement.params,
        vec![json!(10), json!("ten"), json!(20), json!("twenty"), json!("other")]
    );
}

#[test]
fn test_searched_case() {
    let m = member();
    let statement = SelectQuery::select([CaseBuilder::new()
        .when(m.column("age").between(0, 20))
        .then("0-20")
        .when(m.column("age").between(21, 30))
        .then("21-30")
        .otherwise("other")])
    .from(&m)
    .build()
    .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT CASE WHEN m.age BETWEEN $1 AND $2 THEN $3 \
         WHEN m.age BETWEEN $4 AND $5 THEN $6 ELSE $7 END FROM member AS m"
    );
}

#[test]
fn test_constant_and_concat() {
    let m = member();
    let constant = SelectQuery::select([m.column("username"), Expr::value("A")])
        .from(&m)
        .build()
        .unwrap();
    assert_eq!(constant.sql, "SELECT m.username, $1 FROM member AS m");

    let concat = SelectQuery::select([m
        .column("username")
        .concat_str("_")
        .concat(m.column("age").string_value())])
    .from(&m)
    .where_(m.column("username").eq("member"))
    .build()
    .unwrap();
    assert_eq!(
        concat.sql,
        "SELECT (m.username || $1 || CAST(m.age AS TEXT)) FROM member AS m WHERE m.username = $2"
    );
}

#[test]
fn test_sql_functions() {
    let m = member();
    let replaced = SelectQuery::select([Expr::function(
        "regexp_replace",
        vec![m.column("username"), Expr::value("member"), Expr::value("M")],
    )])
    .from(&m)
    .build()
    .unwrap();
    assert_eq!(
        replaced.sql,
        "SELECT regexp_replace(m.username, $1, $2) FROM member AS m"
    );

    let lowered = SelectQuery::select([m.column("username").lower()])
        .from(&m)
        .where_(m.column("username").eq_expr(m.column("username").lower()))
        .build()
        .unwrap();
    assert_eq!(
        lowered.sql,
        "SELECT lower(m.username) FROM member AS m WHERE m.username = lower(m.username)"
    );
}

// ========================================
// Projections onto DTOs
// ========================================

#[test]
fn test_projection_aliases_match_dto_fields() {
    let (m, ms) = (member(), member_sub());
    let statement = SelectQuery::select([
        m.column("username").alias("name"),
        Expr::subquery(SelectQuery::select([ms.column("age").max()]).from(&ms)).alias("age"),
    ])
    .from(&m)
    .build()
    .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT m.username AS name, (SELECT MAX(member_sub.age) FROM member AS member_sub) AS age \
         FROM member AS m"
    );
}

// ========================================
// Dynamic queries
// ========================================

fn search_with_builder(username: Option<&str>, age: Option<i32>) -> SelectQuery {
    let m = member();
    let mut builder = ConditionBuilder::new();
    builder
        .and(m.column("username").eq_opt(username))
        .and(m.column("age").eq_opt(age));
    SelectQuery::select_from(&m).where_opt(builder.build())
}

fn search_with_where_params(username: Option<&str>, age: Option<i32>) -> SelectQuery {
    let m = member();
    SelectQuery::select_from(&m).filter_all([
        m.column("username").eq_opt(username),
        m.column("age").eq_opt(age),
    ])
}

#[test]
fn test_dynamic_query_scenarios() {
    let cases: [(Option<&str>, Option<i32>, &str, Vec<serde_json::Value>); 4] = [
        (
            Some("member"),
            None,
            "SELECT m.* FROM member AS m WHERE m.username = $1",
            vec![json!("member")],
        ),
        (
            None,
            Some(10),
            "SELECT m.* FROM member AS m WHERE m.age = $1",
            vec![json!(10)],
        ),
        (
            Some("member"),
            Some(10),
            "SELECT m.* FROM member AS m WHERE m.username = $1 AND m.age = $2",
            vec![json!("member"), json!(10)],
        ),
        (None, None, "SELECT m.* FROM member AS m", vec![]),
    ];

    for (username, age, sql, params) in cases {
        let built = search_with_builder(username, age).build().unwrap();
        let param_style = search_with_where_params(username, age).build().unwrap();

        assert_eq!(built.sql, sql);
        assert_eq!(built.params, params);
        assert_eq!(built, param_style);
    }
}

#[test]
fn test_dynamic_query_selects_expected_rows() {
    let rows = vec![
        json!({"username": "member", "age": 10}),
        json!({"username": "member2", "age": 20}),
        json!({"username": "member3", "age": 30}),
        json!({"username": "member4", "age": 40}),
    ];

    let names = |username: Option<&str>, age: Option<i32>| -> Vec<String> {
        let query = search_with_where_params(username, age);
        filter_rows(query.condition(), &rows)
            .unwrap()
            .into_iter()
            .map(|row| row["username"].as_str().unwrap_or_default().to_string())
            .collect()
    };

    assert_eq!(names(Some("member"), None), vec!["member"]);
    assert_eq!(names(None, Some(10)), vec!["member"]);
    assert_eq!(names(Some("member"), Some(10)), vec!["member"]);
    assert_eq!(names(Some("member"), Some(20)), Vec::<String>::new());
    assert_eq!(names(None, None).len(), 4);
}

#[test]
fn test_member_search_condition_query() {
    let condition = MemberSearchCondition::new()
        .username("member4")
        .team_name("teamB")
        .age_goe(35)
        .age_loe(40);
    let statement = MemberRepository::search_query(&condition).build().unwrap();

    assert!(statement.sql.contains(
        "WHERE m.username = $1 AND t.name = $2 AND m.age >= $3 AND m.age <= $4"
    ));
    assert_eq!(
        statement.params,
        vec![json!("member4"), json!("teamB"), json!(35), json!(40)]
    );
}

#[test]
fn test_only_typed_values_are_cast() {
    let uuid_name = "550e8400-e29b-41d4-a716-446655440000";
    let condition = MemberSearchCondition::new().username(uuid_name);
    let statement = MemberRepository::search_query(&condition).build().unwrap();
    assert!(statement.sql.contains("WHERE m.username = $1 ORDER BY"));
    assert_eq!(statement.params, vec![json!(uuid_name)]);

    let m = member();
    let id = sqlx::types::Uuid::parse_str(uuid_name).unwrap();
    let statement = SelectQuery::select_from(&m)
        .where_(m.column("username").cast(SqlType::Uuid).eq_expr(Expr::uuid(id)))
        .build()
        .unwrap();
    assert_eq!(
        statement.sql,
        "SELECT m.* FROM member AS m WHERE CAST(m.username AS UUID) = CAST($1 AS UUID)"
    );
    assert_eq!(statement.params, vec![json!(uuid_name)]);
}

// ========================================
// Bulk statements
// ========================================

#[test]
fn test_bulk_update_and_delete() {
    let m = member();

    let rename = UpdateQuery::new(&m)
        .set("username", "non-member")
        .where_(m.column("age").lt(28))
        .build()
        .unwrap();
    assert_eq!(rename.sql, "UPDATE member AS m SET username = $1 WHERE m.age < $2");
    assert_eq!(rename.params, vec![json!("non-member"), json!(28)]);

    let older = UpdateQuery::new(&m)
        .set_expr("age", m.column("age").add(1))
        .build()
        .unwrap();
    assert_eq!(older.sql, "UPDATE member AS m SET age = (m.age + $1)");

    let delete = DeleteQuery::new(&m)
        .where_(m.column("age").gt(18))
        .build()
        .unwrap();
    assert_eq!(delete.sql, "DELETE FROM member AS m WHERE m.age > $1");
}

#[test]
fn test_builder_misuse_is_reported_at_build() {
    let m = member();
    let result = SelectQuery::select_from(&m).on(m.column("age").eq(1)).build();
    assert!(matches!(result, Err(QueryError::InvalidQuery(_))));

    let result = SelectQuery::select_from(&m)
        .where_(m.column("age; DROP TABLE member").eq(1))
        .build();
    assert!(matches!(result, Err(QueryError::Validation(_))));
}
