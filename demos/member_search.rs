//! Member Search Demo
//!
//! Walks through dynamic member searches with QueryHaus:
//! - optional criteria composed into one filter
//! - the SQL and parameters each search renders to
//! - paged results with a total count
//! - a bulk update followed by a fresh query
//!
//! Reads the database settings from `QUERYHAUS_CONFIG` or `./queryhaus.toml`.

use anyhow::Context;
use queryhaus::members::{Member, MemberRepository, MemberSearchCondition, Team, member};
use queryhaus::prelude::*;

fn print_statement(label: &str, query: &SelectQuery) -> anyhow::Result<()> {
    let statement = query.build()?;
    println!("   {}:\n     {}\n     params: {:?}", label, statement.sql, statement.params);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("QueryHaus member search demo\n");

    let config = AppConfig::load().context("loading configuration")?;
    let haus = QueryHaus::from_config(config)
        .await
        .context("connecting to database")?;
    haus.health_check().await?;

    println!("1. Creating tables");
    haus.auto_migrate::<Team>(true).await?;
    haus.auto_migrate::<Member>(true).await?;

    println!("2. Saving teams and members");
    let teams = haus.repository::<Team>();
    let team_a = teams.save(&Team::new("teamA")).await?;
    let team_b = teams.save(&Team::new("teamB")).await?;

    let members = MemberRepository::from_repository(haus.repository::<Member>());
    for (name, age, team) in [
        ("member1", 10, &team_a),
        ("member2", 20, &team_a),
        ("member3", 30, &team_b),
        ("member4", 40, &team_b),
    ] {
        members
            .members()
            .save(&Member::new(name, age).with_team(team))
            .await?;
    }

    println!("\n3. Rendering searches");
    let searches = [
        ("no criteria", MemberSearchCondition::new()),
        ("team only", MemberSearchCondition::new().team_name("teamB")),
        (
            "age range",
            MemberSearchCondition::new().age_goe(15).age_loe(35),
        ),
        (
            "everything",
            MemberSearchCondition::new()
                .username("member4")
                .team_name("teamB")
                .age_goe(35)
                .age_loe(40),
        ),
    ];
    for (label, condition) in &searches {
        print_statement(label, &MemberRepository::search_query(condition))?;
    }

    println!("\n4. Running searches");
    for (label, condition) in &searches {
        let rows = members.search(condition).await?;
        println!("   {} -> {} row(s)", label, rows.len());
        for row in rows {
            println!(
                "     #{} {:?} age {} team {:?}",
                row.member_id, row.username, row.age, row.team_name
            );
        }
    }

    println!("\n5. Paging");
    let page = members
        .search_page(&MemberSearchCondition::new(), 1, Some(2))
        .await?;
    println!(
        "   offset {} limit {:?}: {} of {} (more: {})",
        page.offset,
        page.limit,
        page.results.len(),
        page.total,
        page.has_next()
    );

    println!("\n6. Bulk update");
    let m = member();
    let updated = haus
        .session()
        .execute_update(&UpdateQuery::new(&m).increment("age", 1).where_(m.column("age").lt(25)))
        .await?;
    println!("   {} member(s) got older", updated);
    let young = members
        .search(&MemberSearchCondition::new().age_loe(25))
        .await?;
    println!("   members aged 25 or less now: {}", young.len());

    println!("\nDone");
    Ok(())
}
