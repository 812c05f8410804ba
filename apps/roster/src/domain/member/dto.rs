use serde::{Deserialize, Serialize};

/// Read-only projection of a member joined with its team
///
/// Only ever produced by a query; there is no table behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberDto {
    pub id: i64,
    pub username: String,
    pub team_name: String,
}

impl MemberDto {
    pub fn new(id: i64, username: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            team_name: team_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snake_case_fields() {
        let dto = MemberDto::new(1, "member1", "teamA");

        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "member1");
        assert_eq!(json["team_name"], "teamA");
    }

    #[test]
    fn list_serializes_to_json_array() {
        let dtos = vec![
            MemberDto::new(1, "member1", "teamA"),
            MemberDto::new(2, "member2", "teamB"),
        ];

        let json = serde_json::to_string(&dtos).unwrap();

        assert!(json.starts_with('['));
        assert!(json.contains(r#""username":"member2""#));
        assert!(json.contains(r#""team_name":"teamB""#));
    }
}
