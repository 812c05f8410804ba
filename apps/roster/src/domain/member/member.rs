use serde::{Deserialize, Serialize};

use crate::domain::audit::AuditMetadata;
use crate::domain::team::Team;

/// Member entity
///
/// Owns the many-to-one association to a [`Team`] through `team_id`.
///
/// # Invariants
/// - Username cannot be empty
/// - Age cannot be negative
/// - `team_id`, if set, was taken from a persisted team
/// - `id` and `audit` are either both present (saved) or both absent (new)
///
/// # Example
/// ```
/// use roster::domain::member::Member;
///
/// let member = Member::with_age("member1", 10).expect("valid member");
///
/// assert_eq!(member.username(), "member1");
/// assert_eq!(member.age(), 10);
/// assert!(member.is_new());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: Option<i64>,
    username: String,
    age: i32,
    team_id: Option<i64>,
    audit: Option<AuditMetadata>,
}

impl Member {
    /// Creates a new member with age 0 and no team
    pub fn new(username: impl Into<String>) -> Result<Self, String> {
        Self::with_age(username, 0)
    }

    /// Creates a new member with the given age and no team
    ///
    /// # Returns
    /// * `Ok(Member)` - Transient member without an identity
    /// * `Err(String)` - If the username is empty or the age is negative
    pub fn with_age(username: impl Into<String>, age: i32) -> Result<Self, String> {
        let username = username.into();
        validate_username(&username)?;
        validate_age(age)?;

        Ok(Self {
            id: None,
            username,
            age,
            team_id: None,
            audit: None,
        })
    }

    /// Creates a new member already assigned to a persisted team
    pub fn with_team(username: impl Into<String>, age: i32, team: &Team) -> Result<Self, String> {
        let mut member = Self::with_age(username, age)?;
        member.change_team(team)?;
        Ok(member)
    }

    /// Moves the member to another team
    ///
    /// # Business Rules
    /// - The team must already be saved (it must have an identity)
    pub fn change_team(&mut self, team: &Team) -> Result<(), String> {
        let team_id = team
            .id()
            .ok_or_else(|| format!("Team '{}' must be saved before members join it", team.name()))?;

        self.team_id = Some(team_id);
        Ok(())
    }

    /// Detaches the member from its team
    pub fn leave_team(&mut self) {
        self.team_id = None;
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> Result<(), String> {
        let username = username.into();
        validate_username(&username)?;
        self.username = username;
        Ok(())
    }

    pub fn set_age(&mut self, age: i32) -> Result<(), String> {
        validate_age(age)?;
        self.age = age;
        Ok(())
    }

    // ===== Getters =====

    /// Returns the member's ID, `None` until saved
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Returns the ID of the team this member belongs to
    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    /// Returns the audit metadata, `None` until saved
    pub fn audit(&self) -> Option<&AuditMetadata> {
        self.audit.as_ref()
    }

    /// True while the member has not been saved
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Reconstructs a Member from persistence layer data
    ///
    /// Bypasses validation since the row was validated when it was written.
    /// Only to be used by repository implementations.
    pub fn from_persistence(
        id: i64,
        username: String,
        age: i32,
        team_id: Option<i64>,
        audit: AuditMetadata,
    ) -> Self {
        Self {
            id: Some(id),
            username,
            age,
            team_id,
            audit: Some(audit),
        }
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Member(id={}, username={}, age={})", id, self.username, self.age),
            None => write!(f, "Member(id=?, username={}, age={})", self.username, self.age),
        }
    }
}

fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    Ok(())
}

fn validate_age(age: i32) -> Result<(), String> {
    if age < 0 {
        return Err(format!("Age cannot be negative: {}", age));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::FixedAuditor;

    #[test]
    fn new_member_defaults_to_age_zero_without_team() {
        let member = Member::new("memberA").unwrap();

        assert_eq!(member.username(), "memberA");
        assert_eq!(member.age(), 0);
        assert_eq!(member.team_id(), None);
        assert!(member.audit().is_none());
        assert!(member.is_new());
    }

    #[test]
    fn empty_username_fails() {
        let result = Member::with_age("", 10);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Username cannot be empty"));
    }

    #[test]
    fn negative_age_fails() {
        let result = Member::with_age("member", -1);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("negative"));
    }

    #[test]
    fn joining_unsaved_team_fails() {
        let team = Team::new("teamA").unwrap();
        let result = Member::with_team("member1", 10, &team);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("must be saved"));
    }

    #[test]
    fn change_team_and_leave() {
        let team_a = Team::from_persistence(1, "teamA".to_string());
        let team_b = Team::from_persistence(2, "teamB".to_string());

        let mut member = Member::with_team("member1", 10, &team_a).unwrap();
        assert_eq!(member.team_id(), Some(1));

        member.change_team(&team_b).unwrap();
        assert_eq!(member.team_id(), Some(2));

        member.leave_team();
        assert_eq!(member.team_id(), None);
    }

    #[test]
    fn setters_validate_input() {
        let mut member = Member::with_age("member1", 10).unwrap();

        assert!(member.set_age(-5).is_err());
        assert!(member.set_username(" ").is_err());

        member.set_age(11).unwrap();
        member.set_username("renamed").unwrap();
        assert_eq!(member.age(), 11);
        assert_eq!(member.username(), "renamed");
    }

    #[test]
    fn persisted_member_carries_identity_and_audit() {
        let audit = AuditMetadata::created(&FixedAuditor::new("tester"));
        let member =
            Member::from_persistence(3, "member3".to_string(), 30, Some(2), audit.clone());

        assert!(!member.is_new());
        assert_eq!(member.id(), Some(3));
        assert_eq!(member.team_id(), Some(2));
        assert_eq!(member.audit(), Some(&audit));
        assert_eq!(member.to_string(), "Member(id=3, username=member3, age=30)");
    }
}
