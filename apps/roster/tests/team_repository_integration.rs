//! Integration tests for the team repository and the member ↔ team association

use std::sync::Arc;

use roster::config::DatabaseConfig;
use roster::domain::audit::RandomAuditor;
use roster::domain::member::Member;
use roster::domain::repositories::{MemberRepository, RepositoryError, TeamRepository};
use roster::domain::team::Team;
use roster::infrastructure::database;
use roster::infrastructure::repositories::{SqliteMemberRepository, SqliteTeamRepository};

async fn setup_repos() -> (SqliteMemberRepository, SqliteTeamRepository) {
    let pool = database::connect_and_migrate(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to set up test database");

    (
        SqliteMemberRepository::new(pool.clone(), Arc::new(RandomAuditor)),
        SqliteTeamRepository::new(pool),
    )
}

#[tokio::test]
async fn test_team_save_and_find_by_id() {
    let (_, teams) = setup_repos().await;

    let team = teams
        .save(&Team::new("teamA").unwrap())
        .await
        .expect("Failed to save team");

    let found = teams
        .find_by_id(team.id().expect("ID assigned"))
        .await
        .expect("Failed to find team");

    assert_eq!(found, Some(team));
}

#[tokio::test]
async fn test_team_rename_updates_in_place() {
    let (_, teams) = setup_repos().await;
    let mut team = teams.save(&Team::new("teamA").unwrap()).await.unwrap();

    team.rename("teamZ").unwrap();
    teams.save(&team).await.expect("Failed to update team");

    let all = teams.find_all().await.unwrap();
    assert_eq!(all.len(), 1, "Should only have 1 team (updated)");
    assert_eq!(all[0].name(), "teamZ");
    assert_eq!(all[0].id(), team.id());
}

#[tokio::test]
async fn test_team_find_by_name_and_count() {
    let (_, teams) = setup_repos().await;
    teams.save(&Team::new("teamA").unwrap()).await.unwrap();
    teams.save(&Team::new("teamB").unwrap()).await.unwrap();
    teams.save(&Team::new("teamA").unwrap()).await.unwrap();

    assert_eq!(teams.find_by_name("teamA").await.unwrap().len(), 2);
    assert!(teams.find_by_name("teamC").await.unwrap().is_empty());
    assert_eq!(teams.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_team_delete() {
    let (_, teams) = setup_repos().await;
    let team = teams.save(&Team::new("teamA").unwrap()).await.unwrap();

    teams.delete(&team).await.unwrap();

    assert!(teams.find_by_id(team.id().unwrap()).await.unwrap().is_none());
    assert!(matches!(
        teams.delete_by_id(team.id().unwrap()).await,
        Err(RepositoryError::NotFound { entity: "Team", .. })
    ));
}

#[tokio::test]
async fn test_members_by_team_reverse_lookup() {
    let (members, teams) = setup_repos().await;
    let team_a = teams.save(&Team::new("teamA").unwrap()).await.unwrap();
    let team_b = teams.save(&Team::new("teamB").unwrap()).await.unwrap();

    let seed = vec![
        Member::with_team("member1", 10, &team_a).unwrap(),
        Member::with_team("member2", 20, &team_a).unwrap(),
        Member::with_team("member3", 30, &team_b).unwrap(),
        Member::with_team("member4", 40, &team_b).unwrap(),
    ];
    members.save_all(&seed).await.unwrap();

    let in_a = members.find_by_team_id(team_a.id().unwrap()).await.unwrap();
    let in_b = members.find_by_team_id(team_b.id().unwrap()).await.unwrap();

    let names_a: Vec<&str> = in_a.iter().map(Member::username).collect();
    let names_b: Vec<&str> = in_b.iter().map(Member::username).collect();
    assert_eq!(names_a, vec!["member1", "member2"]);
    assert_eq!(names_b, vec!["member3", "member4"]);
}

#[tokio::test]
async fn test_member_changes_team() {
    let (members, teams) = setup_repos().await;
    let team_a = teams.save(&Team::new("teamA").unwrap()).await.unwrap();
    let team_b = teams.save(&Team::new("teamB").unwrap()).await.unwrap();

    let mut member = members
        .save(&Member::with_team("member1", 10, &team_a).unwrap())
        .await
        .unwrap();

    member.change_team(&team_b).unwrap();
    members.save(&member).await.unwrap();

    assert!(members
        .find_by_team_id(team_a.id().unwrap())
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        members.find_by_team_id(team_b.id().unwrap()).await.unwrap().len(),
        1
    );

    let dtos = members.find_member_dto().await.unwrap();
    assert_eq!(dtos[0].team_name, "teamB");
}

#[tokio::test]
async fn test_member_with_dangling_team_fails_at_write() {
    let (members, _) = setup_repos().await;
    let ghost = Team::from_persistence(404, "ghost".to_string());

    let result = members
        .save(&Member::with_team("member1", 10, &ghost).unwrap())
        .await;

    assert!(
        matches!(result, Err(RepositoryError::Database(_))),
        "Foreign key violation should surface as a storage error"
    );
    assert_eq!(members.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_deleting_team_with_members_fails() {
    let (members, teams) = setup_repos().await;
    let team = teams.save(&Team::new("teamA").unwrap()).await.unwrap();
    members
        .save(&Member::with_team("member1", 10, &team).unwrap())
        .await
        .unwrap();

    let result = teams.delete(&team).await;

    assert!(matches!(result, Err(RepositoryError::Database(_))));
    assert_eq!(teams.count().await.unwrap(), 1);
}
