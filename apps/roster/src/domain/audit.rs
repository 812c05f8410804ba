use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supplies the identifier of whoever is performing the current write
///
/// Repositories receive an implementation explicitly at construction and
/// consult it every time they stamp audit metadata.
pub trait AuditorAware: Send + Sync {
    /// Returns the current actor, if one is known
    fn current_auditor(&self) -> Option<String>;
}

/// Auditor that always reports the same actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAuditor(String);

impl FixedAuditor {
    pub fn new(actor: impl Into<String>) -> Self {
        Self(actor.into())
    }
}

impl AuditorAware for FixedAuditor {
    fn current_auditor(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Auditor that reports a fresh random UUID on every call
///
/// A stand-in for a session or security context lookup. It never identifies
/// a real actor, so it is only suitable for demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAuditor;

impl AuditorAware for RandomAuditor {
    fn current_auditor(&self) -> Option<String> {
        Some(Uuid::new_v4().to_string())
    }
}

/// Creation and modification metadata stamped on every save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMetadata {
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub created_by: Option<String>,
    pub last_modified_by: Option<String>,
}

impl AuditMetadata {
    /// Metadata for an entity being inserted
    ///
    /// Both the created and modified fields carry the same instant and actor.
    pub fn created(auditor: &dyn AuditorAware) -> Self {
        let now = now_millis();
        let actor = auditor.current_auditor();

        Self {
            created_date: now,
            last_modified_date: now,
            created_by: actor.clone(),
            last_modified_by: actor,
        }
    }

    /// Refreshes the modified fields, leaving the creation fields untouched
    pub fn touch(&mut self, auditor: &dyn AuditorAware) {
        self.last_modified_date = now_millis();
        self.last_modified_by = auditor.current_auditor();
    }
}

// Stored timestamps round-trip through TEXT columns, keep them at ms precision.
fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_auditor_returns_same_actor() {
        let auditor = FixedAuditor::new("admin");

        assert_eq!(auditor.current_auditor().as_deref(), Some("admin"));
        assert_eq!(auditor.current_auditor().as_deref(), Some("admin"));
    }

    #[test]
    fn random_auditor_is_never_absent_and_changes_per_call() {
        let auditor = RandomAuditor;

        let first = auditor.current_auditor().expect("actor present");
        let second = auditor.current_auditor().expect("actor present");

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[test]
    fn created_metadata_uses_one_instant_and_actor() {
        let meta = AuditMetadata::created(&FixedAuditor::new("creator"));

        assert_eq!(meta.created_date, meta.last_modified_date);
        assert_eq!(meta.created_by.as_deref(), Some("creator"));
        assert_eq!(meta.last_modified_by.as_deref(), Some("creator"));
        assert_eq!(meta.created_date.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn touch_only_updates_modified_fields() {
        let mut meta = AuditMetadata::created(&FixedAuditor::new("creator"));
        let created_date = meta.created_date;

        meta.touch(&FixedAuditor::new("editor"));

        assert_eq!(meta.created_date, created_date);
        assert_eq!(meta.created_by.as_deref(), Some("creator"));
        assert_eq!(meta.last_modified_by.as_deref(), Some("editor"));
        assert!(meta.last_modified_date >= created_date);
    }
}
