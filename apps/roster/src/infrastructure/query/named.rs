/// A fixed SQL statement registered under a stable name
///
/// The name shows up in logs and in `NonUniqueResult` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedQuery {
    pub name: &'static str,
    pub sql: &'static str,
}

pub const MEMBER_FIND_BY_USERNAME: NamedQuery = NamedQuery {
    name: "Member.findByUsername",
    sql: "SELECT m.member_id, m.username, m.age, m.team_id, m.created_date, \
          m.last_modified_date, m.created_by, m.last_modified_by \
          FROM member m WHERE m.username = ? ORDER BY m.member_id",
};

pub const MEMBER_FIND_USER: NamedQuery = NamedQuery {
    name: "Member.findUser",
    sql: "SELECT m.member_id, m.username, m.age, m.team_id, m.created_date, \
          m.last_modified_date, m.created_by, m.last_modified_by \
          FROM member m WHERE m.username = ? AND m.age = ? ORDER BY m.member_id",
};

pub const MEMBER_FIND_USERNAME_LIST: NamedQuery = NamedQuery {
    name: "Member.findUsernameList",
    sql: "SELECT m.username FROM member m ORDER BY m.member_id",
};

pub const MEMBER_FIND_MEMBER_DTO: NamedQuery = NamedQuery {
    name: "Member.findMemberDto",
    sql: "SELECT m.member_id AS id, m.username AS username, t.name AS team_name \
          FROM member m JOIN team t ON m.team_id = t.team_id ORDER BY m.member_id",
};

// Written against the table without the alias, as plain SQL
pub const MEMBER_NATIVE_BY_USERNAME: NamedQuery = NamedQuery {
    name: "Member.findByNativeQuery",
    sql: "SELECT * FROM member WHERE username = ? ORDER BY member_id LIMIT 1",
};

pub const MEMBER_FIND_ALL_CUSTOM: NamedQuery = NamedQuery {
    name: "Member.findMemberCustom",
    sql: "SELECT member_id, username, age, team_id, created_date, last_modified_date, \
          created_by, last_modified_by FROM member",
};
