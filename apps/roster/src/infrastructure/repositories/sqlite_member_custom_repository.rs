use async_trait::async_trait;
use sqlx::SqlitePool;

use super::rows::{into_members, MemberRow};
use crate::domain::member::Member;
use crate::domain::repositories::{MemberCustomRepository, RepositoryResult};
use crate::infrastructure::query::named::MEMBER_FIND_ALL_CUSTOM;

/// Hand-written member queries run straight against the pool
///
/// `SqliteMemberRepository` owns one of these and forwards
/// `MemberCustomRepository` calls to it.
#[derive(Clone)]
pub struct SqliteMemberCustomRepository {
    pool: SqlitePool,
}

impl SqliteMemberCustomRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberCustomRepository for SqliteMemberCustomRepository {
    async fn find_member_custom(&self) -> RepositoryResult<Vec<Member>> {
        tracing::debug!(query = MEMBER_FIND_ALL_CUSTOM.name, "Running custom query");

        let rows: Vec<MemberRow> = sqlx::query_as(MEMBER_FIND_ALL_CUSTOM.sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(into_members(rows))
    }
}
