use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

use super::rows::{into_members, MemberRow};
use super::SqliteMemberCustomRepository;
use crate::domain::audit::{AuditMetadata, AuditorAware};
use crate::domain::member::{Member, MemberDto};
use crate::domain::page::{Page, PageRequest, Sort};
use crate::domain::repositories::{
    MemberCustomRepository, MemberRepository, RepositoryError, RepositoryResult,
};
use crate::infrastructure::query::named::{
    self, MEMBER_FIND_BY_USERNAME, MEMBER_FIND_MEMBER_DTO, MEMBER_FIND_USER,
    MEMBER_FIND_USERNAME_LIST, MEMBER_NATIVE_BY_USERNAME,
};
use crate::infrastructure::query::{Condition, MemberColumn, MemberCriteria};

/// SQLite implementation of MemberRepository
///
/// Derived queries go through [`MemberCriteria`], named and native queries
/// through the fixed statements in `query::named`. Audit metadata is
/// stamped on every save using the auditor given at construction.
pub struct SqliteMemberRepository {
    pool: SqlitePool,
    auditor: Arc<dyn AuditorAware>,
    custom: SqliteMemberCustomRepository,
}

impl SqliteMemberRepository {
    /// Creates a new SqliteMemberRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for SQLite
    /// * `auditor` - Source of the actor recorded in audit metadata
    pub fn new(pool: SqlitePool, auditor: Arc<dyn AuditorAware>) -> Self {
        let custom = SqliteMemberCustomRepository::new(pool.clone());
        Self {
            pool,
            auditor,
            custom,
        }
    }

    async fn fetch(&self, criteria: &MemberCriteria) -> RepositoryResult<Vec<Member>> {
        let mut qb = criteria.select();
        tracing::debug!(sql = qb.sql(), "Running criteria query");

        let rows: Vec<MemberRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(into_members(rows))
    }

    async fn fetch_named(
        &self,
        query: named::NamedQuery,
        username: &str,
    ) -> RepositoryResult<Vec<Member>> {
        tracing::debug!(query = query.name, "Running named query");

        let rows: Vec<MemberRow> = sqlx::query_as(query.sql)
            .bind(username)
            .fetch_all(&self.pool)
            .await?;
        Ok(into_members(rows))
    }
}

/// Collapses a result list into the single-result shape
fn single(query: &str, mut members: Vec<Member>) -> RepositoryResult<Option<Member>> {
    match members.len() {
        0 | 1 => Ok(members.pop()),
        count => Err(RepositoryError::NonUniqueResult {
            query: query.to_string(),
            count,
        }),
    }
}

async fn insert_member(
    conn: &mut SqliteConnection,
    member: &Member,
    auditor: &dyn AuditorAware,
) -> RepositoryResult<Member> {
    let audit = AuditMetadata::created(auditor);

    let result = sqlx::query(
        r#"
        INSERT INTO member (
            username, age, team_id,
            created_date, last_modified_date, created_by, last_modified_by
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(member.username())
    .bind(member.age())
    .bind(member.team_id())
    .bind(audit.created_date)
    .bind(audit.last_modified_date)
    .bind(audit.created_by.as_deref())
    .bind(audit.last_modified_by.as_deref())
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    tracing::info!(member_id = id, username = member.username(), "Inserted member");

    Ok(Member::from_persistence(
        id,
        member.username().to_string(),
        member.age(),
        member.team_id(),
        audit,
    ))
}

async fn update_member(
    conn: &mut SqliteConnection,
    id: i64,
    member: &Member,
    auditor: &dyn AuditorAware,
) -> RepositoryResult<Member> {
    let mut audit = member
        .audit()
        .cloned()
        .ok_or_else(|| RepositoryError::InvalidArgument(format!("Member {} has no audit data", id)))?;
    audit.touch(auditor);

    let result = sqlx::query(
        r#"
        UPDATE member
        SET username = ?, age = ?, team_id = ?, last_modified_date = ?, last_modified_by = ?
        WHERE member_id = ?
        "#,
    )
    .bind(member.username())
    .bind(member.age())
    .bind(member.team_id())
    .bind(audit.last_modified_date)
    .bind(audit.last_modified_by.as_deref())
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound {
            entity: "Member",
            id,
        });
    }

    tracing::info!(member_id = id, "Updated member");

    Ok(Member::from_persistence(
        id,
        member.username().to_string(),
        member.age(),
        member.team_id(),
        audit,
    ))
}

async fn save_member(
    conn: &mut SqliteConnection,
    member: &Member,
    auditor: &dyn AuditorAware,
) -> RepositoryResult<Member> {
    match member.id() {
        None => insert_member(conn, member, auditor).await,
        Some(id) => update_member(conn, id, member, auditor).await,
    }
}

#[async_trait]
impl MemberCustomRepository for SqliteMemberRepository {
    async fn find_member_custom(&self) -> RepositoryResult<Vec<Member>> {
        self.custom.find_member_custom().await
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn save(&self, member: &Member) -> RepositoryResult<Member> {
        let mut tx = self.pool.begin().await?;
        let saved = save_member(&mut *tx, member, self.auditor.as_ref()).await?;
        tx.commit().await?;

        Ok(saved)
    }

    async fn save_all(&self, members: &[Member]) -> RepositoryResult<Vec<Member>> {
        let mut tx = self.pool.begin().await?;

        let mut saved = Vec::with_capacity(members.len());
        for member in members {
            saved.push(save_member(&mut *tx, member, self.auditor.as_ref()).await?);
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>> {
        let criteria =
            MemberCriteria::new().with(Condition::Eq(MemberColumn::Id, id.into()));

        Ok(self.fetch(&criteria).await?.pop())
    }

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM member WHERE member_id = ?)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists != 0)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        self.fetch(&MemberCriteria::new().order_by_id()).await
    }

    async fn find_all_sorted(&self, sort: &Sort) -> RepositoryResult<Vec<Member>> {
        self.fetch(&MemberCriteria::new().sorted(sort)?).await
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn delete(&self, member: &Member) -> RepositoryResult<()> {
        let Some(id) = member.id() else {
            tracing::debug!("Ignoring delete of unsaved member");
            return Ok(());
        };

        sqlx::query("DELETE FROM member WHERE member_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(member_id = id, "Deleted member");
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM member WHERE member_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Member",
                id,
            });
        }

        tracing::info!(member_id = id, "Deleted member");
        Ok(())
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM member").execute(&self.pool).await?;

        tracing::info!(rows = result.rows_affected(), "Deleted all members");
        Ok(())
    }

    async fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: i32,
    ) -> RepositoryResult<Vec<Member>> {
        let criteria = MemberCriteria::new()
            .username_eq(username)
            .age_greater_than(age)
            .order_by_id();

        self.fetch(&criteria).await
    }

    async fn find_list_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        self.fetch(&MemberCriteria::new().username_eq(username).order_by_id())
            .await
    }

    async fn find_member_by_username(&self, username: &str) -> RepositoryResult<Option<Member>> {
        let members = self
            .fetch(&MemberCriteria::new().username_eq(username).order_by_id())
            .await?;

        single("Member.findMemberByUsername", members)
    }

    async fn find_optional_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Option<Member>> {
        let members = self
            .fetch(&MemberCriteria::new().username_eq(username).order_by_id())
            .await?;

        single("Member.findOptionalByUsername", members)
    }

    async fn find_page_by_age_greater_than(
        &self,
        age: i32,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Member>> {
        let criteria = MemberCriteria::new().age_greater_than(age);
        let paged = criteria.clone().paged(request)?;

        // Content and total must come from the same snapshot
        let mut tx = self.pool.begin().await?;

        let mut select = paged.select();
        tracing::debug!(sql = select.sql(), "Running page query");
        let rows: Vec<MemberRow> = select.build_query_as().fetch_all(&mut *tx).await?;

        let mut count = criteria.count();
        let (total,): (i64,) = count.build_query_as().fetch_one(&mut *tx).await?;

        tx.commit().await?;

        Ok(Page::new(into_members(rows), request, total as u64))
    }

    async fn find_by_team_id(&self, team_id: i64) -> RepositoryResult<Vec<Member>> {
        self.fetch(&MemberCriteria::new().team_id_eq(team_id).order_by_id())
            .await
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        self.fetch_named(MEMBER_FIND_BY_USERNAME, username).await
    }

    async fn find_user(&self, username: &str, age: i32) -> RepositoryResult<Vec<Member>> {
        tracing::debug!(query = MEMBER_FIND_USER.name, "Running named query");

        let rows: Vec<MemberRow> = sqlx::query_as(MEMBER_FIND_USER.sql)
            .bind(username)
            .bind(age)
            .fetch_all(&self.pool)
            .await?;

        Ok(into_members(rows))
    }

    async fn find_username_list(&self) -> RepositoryResult<Vec<String>> {
        tracing::debug!(query = MEMBER_FIND_USERNAME_LIST.name, "Running named query");

        let usernames: Vec<String> = sqlx::query_scalar(MEMBER_FIND_USERNAME_LIST.sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(usernames)
    }

    async fn find_member_dto(&self) -> RepositoryResult<Vec<MemberDto>> {
        tracing::debug!(query = MEMBER_FIND_MEMBER_DTO.name, "Running named query");

        let dtos: Vec<MemberDto> = sqlx::query_as(MEMBER_FIND_MEMBER_DTO.sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(dtos)
    }

    async fn find_by_names(&self, usernames: &[String]) -> RepositoryResult<Vec<Member>> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        self.fetch(&MemberCriteria::new().username_in(usernames).order_by_id())
            .await
    }

    async fn find_by_native_query(&self, username: &str) -> RepositoryResult<Option<Member>> {
        Ok(self
            .fetch_named(MEMBER_NATIVE_BY_USERNAME, username)
            .await?
            .pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, username: &str) -> Member {
        Member::from_persistence(
            id,
            username.to_string(),
            10,
            None,
            AuditMetadata::created(&crate::domain::audit::FixedAuditor::new("t")),
        )
    }

    #[test]
    fn single_accepts_zero_or_one() {
        assert_eq!(single("q", vec![]).unwrap(), None);
        assert_eq!(single("q", vec![member(1, "a")]).unwrap().unwrap().id(), Some(1));
    }

    #[test]
    fn single_rejects_many() {
        let result = single("Member.findMemberByUsername", vec![member(1, "a"), member(2, "a")]);

        match result {
            Err(RepositoryError::NonUniqueResult { query, count }) => {
                assert_eq!(query, "Member.findMemberByUsername");
                assert_eq!(count, 2);
            }
            other => panic!("Expected NonUniqueResult, got {:?}", other),
        }
    }
}
