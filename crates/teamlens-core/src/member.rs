use crate::error::{Result, TeamlensError};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BigFive / CommunicationStyle / UserManual
// ---------------------------------------------------------------------------

/// Free-text levels for the five OCEAN traits (e.g. "High", "Low-Moderate").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BigFive {
    #[serde(default)]
    pub openness: String,
    #[serde(default)]
    pub conscientiousness: String,
    #[serde(default)]
    pub extraversion: String,
    #[serde(default)]
    pub agreeableness: String,
    #[serde(default)]
    pub neuroticism: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationStyle {
    #[serde(default)]
    pub how_to_communicate: Vec<String>,
    #[serde(default)]
    pub feedback_preference: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserManual {
    #[serde(default)]
    pub how_to_get_best_out: Vec<String>,
    #[serde(default)]
    pub what_shuts_down: Vec<String>,
}

// ---------------------------------------------------------------------------
// TeamMember
// ---------------------------------------------------------------------------

/// A team member profile. The email is the authoritative identity key
/// (case-insensitive); `id` is a derived URL slug that may change when a
/// profile is regenerated.
///
/// Field names serialize as camelCase — the wire format shared by the
/// built-in roster asset, the persisted store, and the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub mbti: String,
    #[serde(default)]
    pub disc: String,
    #[serde(default)]
    pub enneagram: String,
    #[serde(default)]
    pub clifton_strengths: Vec<String>,
    #[serde(default)]
    pub big_five: BigFive,
    #[serde(default)]
    pub communication_style: CommunicationStyle,
    #[serde(default)]
    pub user_manual: UserManual,
    #[serde(default)]
    pub ideal_collaborator: String,
    #[serde(default)]
    pub full_profile: String,
}

impl TeamMember {
    /// First CliftonStrengths entry — the "top strength" used in summaries.
    /// Ordering of the list is meaningful.
    pub fn top_strength(&self) -> Option<&str> {
        self.clifton_strengths.first().map(String::as_str)
    }

    /// Lowercase form of the identity key.
    pub fn email_key(&self) -> String {
        self.email.to_lowercase()
    }

    /// Reject profiles missing any of the three required identity fields.
    /// Runs before any store write.
    pub fn validate_identity(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(TeamlensError::MissingField("id"));
        }
        if self.name.trim().is_empty() {
            return Err(TeamlensError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(TeamlensError::MissingField("email"));
        }
        Ok(())
    }

    /// Normalize loosely-structured generated JSON into a `TeamMember`.
    ///
    /// The generator is only trusted for the personality fields: `name` and
    /// `email` are forced to the caller's values, a missing `id` is derived
    /// from the name, unknown fields are dropped, and missing optional
    /// fields default to empty. `avatar`, when given, overrides whatever the
    /// generator produced.
    pub fn from_generated(
        value: serde_json::Value,
        name: &str,
        email: &str,
        avatar: Option<String>,
    ) -> Result<Self> {
        let mut member: TeamMember = serde_json::from_value(sanitize_identity(value, name, email))?;
        member.name = name.to_string();
        member.email = email.to_string();
        if member.id.trim().is_empty() {
            member.id = slugify(name);
        }
        if avatar.is_some() {
            member.avatar = avatar;
        }
        member.validate_identity()?;
        Ok(member)
    }
}

/// Ensure the identity keys deserialize even when the generator omits them;
/// the real values are overwritten right after.
fn sanitize_identity(mut value: serde_json::Value, name: &str, email: &str) -> serde_json::Value {
    if let Some(obj) = value.as_object_mut() {
        obj.entry("id").or_insert_with(|| "".into());
        obj.insert("name".into(), name.into());
        obj.insert("email".into(), email.into());
    }
    value
}

// ---------------------------------------------------------------------------
// Slug derivation
// ---------------------------------------------------------------------------

/// Derive a URL-safe slug from a display name: lowercase, strip everything
/// but ASCII letters and spaces, collapse whitespace runs to single hyphens.
pub fn slugify(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
