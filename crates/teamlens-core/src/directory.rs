//! The profile directory: one duplicate-free view over the built-in roster
//! and the persisted profile store.
//!
//! Precedence is by email, not by slug — a persisted record fully replaces
//! the built-in record with the same (case-insensitive) email. Read paths
//! never fail: when the store is unreachable they degrade to built-in-only
//! results. Writes propagate store errors.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::member::TeamMember;
use crate::roster;
use crate::store::ProfileStore;

#[derive(Clone)]
pub struct Directory {
    store: Arc<dyn ProfileStore>,
}

impl Directory {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Persisted profiles, or an empty set when the store is unreachable.
    fn persisted(&self) -> Vec<TeamMember> {
        match self.store.list() {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("profile store unavailable, serving built-in roster only: {e}");
                Vec::new()
            }
        }
    }

    /// All team members: built-ins whose email has no persisted override,
    /// in declaration order, followed by persisted profiles in store order.
    pub fn list_all(&self) -> Vec<TeamMember> {
        let persisted = self.persisted();
        let overridden: HashSet<String> = persisted.iter().map(|m| m.email_key()).collect();

        roster::builtin()
            .iter()
            .filter(|m| !overridden.contains(&m.email_key()))
            .cloned()
            .chain(persisted)
            .collect()
    }

    /// Lookup by email, persisted records first. Absent is not an error.
    pub fn find_by_email(&self, email: &str) -> Option<TeamMember> {
        let key = email.to_lowercase();
        match self.store.get_by_email(&key) {
            Ok(Some(m)) => return Some(m),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("profile store unavailable during email lookup: {e}");
            }
        }
        roster::builtin()
            .iter()
            .find(|m| m.email_key() == key)
            .cloned()
    }

    /// Lookup by slug with the same precedence rule. A built-in record only
    /// matches while its email has no persisted override — an override that
    /// changed the slug orphans the old built-in id.
    pub fn find_by_id(&self, id: &str) -> Option<TeamMember> {
        match self.store.get_by_id(id) {
            Ok(Some(m)) => return Some(m),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("profile store unavailable during id lookup: {e}");
            }
        }
        let builtin = roster::builtin().iter().find(|m| m.id == id)?;
        match self.store.get_by_email(&builtin.email_key()) {
            Ok(Some(_)) => None,
            Ok(None) => Some(builtin.clone()),
            Err(_) => Some(builtin.clone()),
        }
    }

    /// True iff `find_by_email` resolves. Gates onboarding vs. directory
    /// redirects.
    pub fn has_profile(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    /// Upsert a profile into the persisted set, keyed by lowercase email.
    /// The only mutation operation; full replacement, never a field merge.
    /// Store failures surface to the caller — a save must not drop data
    /// silently.
    pub fn save(&self, member: &TeamMember) -> Result<()> {
        member.validate_identity()?;
        self.store.upsert(member)
    }

    /// Set the avatar on a persisted profile by rewriting the whole record.
    /// Only persisted profiles can carry an avatar update; an email with no
    /// persisted record is a not-found error even when a built-in record
    /// exists.
    pub fn update_avatar(&self, email: &str, avatar: &str) -> Result<TeamMember> {
        let mut member = self
            .store
            .get_by_email(email)?
            .ok_or_else(|| crate::error::TeamlensError::ProfileNotFound(email.to_string()))?;
        member.avatar = Some(avatar.to_string());
        self.store.upsert(&member)?;
        Ok(member)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
