use async_trait::async_trait;

use super::errors::RepositoryResult;
use crate::domain::member::{Member, MemberDto};
use crate::domain::page::{Page, PageRequest, Sort};

/// Hand-written queries that cannot be expressed through criteria
///
/// Kept as its own trait so implementations can be composed into
/// [`MemberRepository`] by delegation.
#[async_trait]
pub trait MemberCustomRepository: Send + Sync {
    /// Loads every member with a query written directly against the pool
    async fn find_member_custom(&self) -> RepositoryResult<Vec<Member>>;
}

/// Repository trait for the Member entity
///
/// Result shapes follow the return type:
/// - `Vec<Member>`: empty when nothing matches
/// - `Option<Member>` from a single lookup: `None` when nothing matches,
///   `RepositoryError::NonUniqueResult` when several rows match
#[async_trait]
pub trait MemberRepository: MemberCustomRepository {
    // ===== CRUD =====

    /// Inserts a new member or updates an existing one
    ///
    /// Returns the stored state: a new member comes back with its ID and
    /// audit metadata assigned.
    async fn save(&self, member: &Member) -> RepositoryResult<Member>;

    /// Saves several members in one transaction
    async fn save_all(&self, members: &[Member]) -> RepositoryResult<Vec<Member>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>>;

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool>;

    /// All members in insertion order
    async fn find_all(&self) -> RepositoryResult<Vec<Member>>;

    async fn find_all_sorted(&self, sort: &Sort) -> RepositoryResult<Vec<Member>>;

    async fn count(&self) -> RepositoryResult<i64>;

    /// Deletes a saved member; does nothing for a member that was never saved
    async fn delete(&self, member: &Member) -> RepositoryResult<()>;

    /// Deletes a member by ID, failing if it does not exist
    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;

    async fn delete_all(&self) -> RepositoryResult<()>;

    // ===== Criteria queries =====

    /// Members with the given username and an age strictly above `age`,
    /// in insertion order
    async fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: i32,
    ) -> RepositoryResult<Vec<Member>>;

    async fn find_list_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// Single nullable lookup
    async fn find_member_by_username(&self, username: &str) -> RepositoryResult<Option<Member>>;

    /// Optional lookup; absence is never an error
    async fn find_optional_by_username(&self, username: &str)
        -> RepositoryResult<Option<Member>>;

    /// Page of members older than `age`
    async fn find_page_by_age_greater_than(
        &self,
        age: i32,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Member>>;

    /// Reverse side of the team association
    async fn find_by_team_id(&self, team_id: i64) -> RepositoryResult<Vec<Member>>;

    // ===== Named and explicit queries =====

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// Members matching both username and exact age
    async fn find_user(&self, username: &str, age: i32) -> RepositoryResult<Vec<Member>>;

    async fn find_username_list(&self) -> RepositoryResult<Vec<String>>;

    /// Members that belong to a team, projected with the team's name
    async fn find_member_dto(&self) -> RepositoryResult<Vec<MemberDto>>;

    async fn find_by_names(&self, usernames: &[String]) -> RepositoryResult<Vec<Member>>;

    /// First member with the username, using raw SQL
    async fn find_by_native_query(&self, username: &str) -> RepositoryResult<Option<Member>>;
}
