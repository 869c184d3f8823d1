//! The built-in roster: team-member records fixed at deploy time.
//!
//! These are default records only — a persisted profile with the same email
//! replaces the built-in one entirely (see [`crate::directory`]).

use crate::member::TeamMember;
use std::sync::OnceLock;

const ROSTER_JSON: &str = include_str!("../assets/roster.json");

static ROSTER: OnceLock<Vec<TeamMember>> = OnceLock::new();

/// The built-in roster, in declaration order.
pub fn builtin() -> &'static [TeamMember] {
    ROSTER.get_or_init(|| {
        serde_json::from_str(ROSTER_JSON).unwrap_or_else(|e| {
            // The asset is compiled in; a parse failure is a build defect.
            panic!("embedded roster.json is invalid: {e}")
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn roster_has_seven_members() {
        assert_eq!(builtin().len(), 7);
    }

    #[test]
    fn roster_emails_are_unique_case_insensitive() {
        let emails: HashSet<String> = builtin().iter().map(|m| m.email_key()).collect();
        assert_eq!(emails.len(), builtin().len());
    }

    #[test]
    fn roster_ids_are_unique() {
        let ids: HashSet<&str> = builtin().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), builtin().len());
    }

    #[test]
    fn leo_is_present_with_expected_slug() {
        let leo = builtin()
            .iter()
            .find(|m| m.email == "leo@casperstudios.xyz")
            .expect("leo in roster");
        assert_eq!(leo.id, "leo-kim");
        assert_eq!(leo.top_strength(), Some("Strategic"));
    }

    #[test]
    fn every_member_has_complete_profile_fields() {
        for m in builtin() {
            assert!(!m.mbti.is_empty(), "{}: mbti", m.id);
            assert!(!m.clifton_strengths.is_empty(), "{}: strengths", m.id);
            assert!(!m.big_five.openness.is_empty(), "{}: bigFive", m.id);
            assert!(!m.full_profile.is_empty(), "{}: fullProfile", m.id);
            assert!(
                !m.communication_style.how_to_communicate.is_empty(),
                "{}: communicationStyle",
                m.id
            );
        }
    }
}
