use std::sync::Arc;

use roster::config::DatabaseConfig;
use roster::domain::audit::RandomAuditor;
use roster::domain::member::Member;
use roster::domain::page::{Direction, PageRequest, Sort};
use roster::domain::repositories::{
    MemberRepository, RepositoryError, RepositoryResult, TeamRepository,
};
use roster::domain::team::Team;
use roster::infrastructure::database;
use roster::infrastructure::repositories::{SqliteMemberRepository, SqliteTeamRepository};

#[tokio::main]
async fn main() -> RepositoryResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = DatabaseConfig::from_env();

    tracing::info!("Connecting to database...");
    let pool = database::connect_and_migrate(&config).await?;
    tracing::info!("Database ready");

    let teams = SqliteTeamRepository::new(pool.clone());
    let members = SqliteMemberRepository::new(pool, Arc::new(RandomAuditor));

    let team_a = teams.save(&Team::new("teamA").map_err(RepositoryError::InvalidArgument)?).await?;
    let team_b = teams.save(&Team::new("teamB").map_err(RepositoryError::InvalidArgument)?).await?;

    let seed = [
        ("member1", 10, &team_a),
        ("member2", 20, &team_a),
        ("member3", 30, &team_b),
        ("member4", 40, &team_b),
    ]
    .into_iter()
    .map(|(name, age, team)| Member::with_team(name, age, team))
    .collect::<Result<Vec<_>, _>>()
    .map_err(RepositoryError::InvalidArgument)?;

    members.save_all(&seed).await?;

    for member in members.find_all().await? {
        tracing::info!(%member, team_id = ?member.team_id(), "Member");
    }

    let dtos = members.find_member_dto().await?;
    match serde_json::to_string(&dtos) {
        Ok(json) => tracing::info!("Member DTOs: {}", json),
        Err(e) => tracing::warn!("Failed to serialize member DTOs: {}", e),
    }

    let request = PageRequest::of(0, 3, Sort::by(Direction::Desc, "username"))
        .map_err(RepositoryError::InvalidArgument)?;
    let page = members.find_page_by_age_greater_than(5, &request).await?;
    tracing::info!(
        page = page.number(),
        total_elements = page.total_elements(),
        total_pages = page.total_pages(),
        "First page: {:?}",
        page.content().iter().map(Member::username).collect::<Vec<_>>()
    );

    Ok(())
}
