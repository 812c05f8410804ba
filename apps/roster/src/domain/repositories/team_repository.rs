use async_trait::async_trait;

use super::errors::RepositoryResult;
use crate::domain::team::Team;

/// Repository trait for the Team entity
///
/// Members are not reachable from here; use
/// `MemberRepository::find_by_team_id` for the reverse lookup.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a team (insert when new, update otherwise)
    async fn save(&self, team: &Team) -> RepositoryResult<Team>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>>;

    /// All teams in insertion order
    async fn find_all(&self) -> RepositoryResult<Vec<Team>>;

    /// Teams carrying exactly this name
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Team>>;

    async fn count(&self) -> RepositoryResult<i64>;

    /// Delete a saved team; a team that was never saved is ignored
    async fn delete(&self, team: &Team) -> RepositoryResult<()>;

    /// Delete a team by ID, failing if it does not exist
    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;
}
