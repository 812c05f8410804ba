use async_trait::async_trait;
use sqlx::SqlitePool;

use super::rows::TeamRow;
use crate::domain::repositories::{RepositoryError, RepositoryResult, TeamRepository};
use crate::domain::team::Team;

/// SQLite implementation of TeamRepository
pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    /// Creates a new SqliteTeamRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn save(&self, team: &Team) -> RepositoryResult<Team> {
        match team.id() {
            None => {
                let result = sqlx::query("INSERT INTO team (name) VALUES (?)")
                    .bind(team.name())
                    .execute(&self.pool)
                    .await?;

                let id = result.last_insert_rowid();
                tracing::info!(team_id = id, name = team.name(), "Inserted team");

                Ok(Team::from_persistence(id, team.name().to_string()))
            }
            Some(id) => {
                let result = sqlx::query("UPDATE team SET name = ? WHERE team_id = ?")
                    .bind(team.name())
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound { entity: "Team", id });
                }

                tracing::info!(team_id = id, "Updated team");
                Ok(team.clone())
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>> {
        let row: Option<TeamRow> =
            sqlx::query_as("SELECT team_id, name FROM team WHERE team_id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Team::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Team>> {
        let rows: Vec<TeamRow> = sqlx::query_as("SELECT team_id, name FROM team ORDER BY team_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Team>> {
        let rows: Vec<TeamRow> =
            sqlx::query_as("SELECT team_id, name FROM team WHERE name = ? ORDER BY team_id")
                .bind(name)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn delete(&self, team: &Team) -> RepositoryResult<()> {
        let Some(id) = team.id() else {
            tracing::debug!("Ignoring delete of unsaved team");
            return Ok(());
        };

        sqlx::query("DELETE FROM team WHERE team_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(team_id = id, "Deleted team");
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM team WHERE team_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound { entity: "Team", id });
        }

        tracing::info!(team_id = id, "Deleted team");
        Ok(())
    }
}
