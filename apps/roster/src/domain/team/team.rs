use serde::{Deserialize, Serialize};

/// Team entity
///
/// A named group of members. The team does not own its members: the
/// association is held by `Member::team_id`, and the reverse lookup is an
/// explicit repository query (`MemberRepository::find_by_team_id`).
///
/// # Invariants
/// - Name cannot be empty
/// - Identity is assigned by the repository on first save
///
/// # Example
/// ```
/// use roster::domain::team::Team;
///
/// let team = Team::new("teamA").expect("valid team");
///
/// assert_eq!(team.name(), "teamA");
/// assert!(team.is_new());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: Option<i64>,
    name: String,
}

impl Team {
    /// Creates a new, not yet persisted team
    ///
    /// # Returns
    /// * `Ok(Team)` - Transient team without an identity
    /// * `Err(String)` - If the name is empty
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Team name cannot be empty".to_string());
        }

        Ok(Self { id: None, name })
    }

    /// Renames the team
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Team name cannot be empty".to_string());
        }

        self.name = name;
        Ok(())
    }

    /// Returns the team's ID, `None` until saved
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True while the team has not been saved
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Only to be used by repository implementations.
    pub fn from_persistence(id: i64, name: String) -> Self {
        Self { id: Some(id), name }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Team(id={}, name={})", id, self.name),
            None => write!(f, "Team(id=?, name={})", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_team_with_valid_name() {
        let team = Team::new("teamA").unwrap();

        assert_eq!(team.name(), "teamA");
        assert_eq!(team.id(), None);
        assert!(team.is_new());
    }

    #[test]
    fn create_team_with_blank_name_fails() {
        let result = Team::new("   ");

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("cannot be empty"));
    }

    #[test]
    fn rename_rejects_empty_name() {
        let mut team = Team::new("teamA").unwrap();

        assert!(team.rename("").is_err());
        assert_eq!(team.name(), "teamA");

        team.rename("teamB").unwrap();
        assert_eq!(team.name(), "teamB");
    }

    #[test]
    fn persisted_team_is_not_new() {
        let team = Team::from_persistence(7, "teamA".to_string());

        assert!(!team.is_new());
        assert_eq!(team.id(), Some(7));
    }

    #[test]
    fn display_shows_id_and_name() {
        assert_eq!(
            Team::from_persistence(1, "teamA".to_string()).to_string(),
            "Team(id=1, name=teamA)"
        );
        assert_eq!(Team::new("teamB").unwrap().to_string(), "Team(id=?, name=teamB)");
    }
}
