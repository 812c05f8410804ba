use chrono::{DateTime, Utc};

use crate::domain::audit::AuditMetadata;
use crate::domain::member::Member;
use crate::domain::team::Team;

/// Raw `member` row as selected by `MEMBER_COLUMNS`
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MemberRow {
    pub member_id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub created_by: Option<String>,
    pub last_modified_by: Option<String>,
}

impl From<MemberRow> for Member {
    fn from(r: MemberRow) -> Self {
        Member::from_persistence(
            r.member_id,
            r.username,
            r.age,
            r.team_id,
            AuditMetadata {
                created_date: r.created_date,
                last_modified_date: r.last_modified_date,
                created_by: r.created_by,
                last_modified_by: r.last_modified_by,
            },
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TeamRow {
    pub team_id: i64,
    pub name: String,
}

impl From<TeamRow> for Team {
    fn from(r: TeamRow) -> Self {
        Team::from_persistence(r.team_id, r.name)
    }
}

pub(crate) fn into_members(rows: Vec<MemberRow>) -> Vec<Member> {
    rows.into_iter().map(Member::from).collect()
}
