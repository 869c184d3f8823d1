//! Persistent storage for generated profiles using redb.
//!
//! # Table design
//!
//! - `profiles`: lowercase email → JSON-encoded row `{seq, member}`. The
//!   email is the authoritative identity key, so upserts are keyed here.
//!   `seq` is an insertion counter; replacing an existing email keeps the
//!   old `seq`, so a re-saved profile keeps its directory position.
//! - `slugs`: slug → lowercase email. Second unique index for id lookups.
//!   When a re-save changes the slug, the old mapping is removed (stale
//!   bookmarked ids stop resolving).
//! - `meta`: holds the next `seq` value.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TeamlensError};
use crate::member::TeamMember;

// ---------------------------------------------------------------------------
// ProfileStore trait
// ---------------------------------------------------------------------------

/// The read-write collaborator behind the directory resolver. Emails are
/// compared case-insensitively by every implementation.
pub trait ProfileStore: Send + Sync {
    /// All persisted profiles in insertion order.
    fn list(&self) -> Result<Vec<TeamMember>>;

    /// Point lookup by email (case-insensitive).
    fn get_by_email(&self, email: &str) -> Result<Option<TeamMember>>;

    /// Point lookup by slug.
    fn get_by_id(&self, id: &str) -> Result<Option<TeamMember>>;

    /// Insert or fully replace the record for `member.email`.
    fn upsert(&self, member: &TeamMember) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Table definitions
// ---------------------------------------------------------------------------

const PROFILES: TableDefinition<&str, &[u8]> = TableDefinition::new("profiles");
const SLUGS: TableDefinition<&str, &str> = TableDefinition::new("slugs");
const META: TableDefinition<&str, u64> = TableDefinition::new("meta");

const NEXT_SEQ_KEY: &str = "next_seq";

#[derive(Debug, Serialize, Deserialize)]
struct StoredRow {
    seq: u64,
    member: TeamMember,
}

// ---------------------------------------------------------------------------
// RedbStore
// ---------------------------------------------------------------------------

/// Durable `ProfileStore` backed by a single redb file.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create the database at `path`, ensuring all tables exist.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path).map_err(|e| TeamlensError::Store(e.to_string()))?;
        let wt = db
            .begin_write()
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        wt.open_table(PROFILES)
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        wt.open_table(SLUGS)
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        wt.open_table(META)
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        wt.commit()
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        Ok(Self { db })
    }

    fn decode(bytes: &[u8]) -> Result<StoredRow> {
        serde_json::from_slice(bytes).map_err(|e| TeamlensError::Store(e.to_string()))
    }
}

impl ProfileStore for RedbStore {
    fn list(&self) -> Result<Vec<TeamMember>> {
        let rt = self
            .db
            .begin_read()
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        let table = rt
            .open_table(PROFILES)
            .map_err(|e| TeamlensError::Store(e.to_string()))?;

        let mut rows = Vec::new();
        for entry in table
            .iter()
            .map_err(|e| TeamlensError::Store(e.to_string()))?
        {
            let (_, v) = entry.map_err(|e| TeamlensError::Store(e.to_string()))?;
            rows.push(Self::decode(v.value())?);
        }
        rows.sort_by_key(|r| r.seq);
        Ok(rows.into_iter().map(|r| r.member).collect())
    }

    fn get_by_email(&self, email: &str) -> Result<Option<TeamMember>> {
        let key = email.to_lowercase();
        let rt = self
            .db
            .begin_read()
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        let table = rt
            .open_table(PROFILES)
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        let row = table
            .get(key.as_str())
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        match row {
            Some(v) => Ok(Some(Self::decode(v.value())?.member)),
            None => Ok(None),
        }
    }

    fn get_by_id(&self, id: &str) -> Result<Option<TeamMember>> {
        let rt = self
            .db
            .begin_read()
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        let slugs = rt
            .open_table(SLUGS)
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        let email = match slugs
            .get(id)
            .map_err(|e| TeamlensError::Store(e.to_string()))?
        {
            Some(v) => v.value().to_string(),
            None => return Ok(None),
        };
        drop(slugs);
        self.get_by_email(&email)
    }

    fn upsert(&self, member: &TeamMember) -> Result<()> {
        let key = member.email_key();
        let wt = self
            .db
            .begin_write()
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        {
            let mut profiles = wt
                .open_table(PROFILES)
                .map_err(|e| TeamlensError::Store(e.to_string()))?;

            // A replaced record keeps its insertion position.
            let prior: Option<StoredRow> = match profiles
                .get(key.as_str())
                .map_err(|e| TeamlensError::Store(e.to_string()))?
            {
                Some(v) => Some(Self::decode(v.value())?),
                None => None,
            };

            let seq = match &prior {
                Some(row) => row.seq,
                None => {
                    let mut meta = wt
                        .open_table(META)
                        .map_err(|e| TeamlensError::Store(e.to_string()))?;
                    let next = meta
                        .get(NEXT_SEQ_KEY)
                        .map_err(|e| TeamlensError::Store(e.to_string()))?
                        .map(|v| v.value())
                        .unwrap_or(0);
                    meta.insert(NEXT_SEQ_KEY, next + 1)
                        .map_err(|e| TeamlensError::Store(e.to_string()))?;
                    next
                }
            };

            let row = StoredRow {
                seq,
                member: member.clone(),
            };
            let bytes =
                serde_json::to_vec(&row).map_err(|e| TeamlensError::Store(e.to_string()))?;
            profiles
                .insert(key.as_str(), bytes.as_slice())
                .map_err(|e| TeamlensError::Store(e.to_string()))?;

            let mut slugs = wt
                .open_table(SLUGS)
                .map_err(|e| TeamlensError::Store(e.to_string()))?;
            if let Some(old) = prior {
                if old.member.id != member.id {
                    slugs
                        .remove(old.member.id.as_str())
                        .map_err(|e| TeamlensError::Store(e.to_string()))?;
                }
            }
            slugs
                .insert(member.id.as_str(), key.as_str())
                .map_err(|e| TeamlensError::Store(e.to_string()))?;
        }
        wt.commit()
            .map_err(|e| TeamlensError::Store(e.to_string()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory `ProfileStore` with the same upsert/ordering semantics as
/// [`RedbStore`]. Used by the resolver's unit tests and anywhere a durable
/// file is unnecessary.
#[derive(Default)]
pub struct MemoryStore {
    rows: std::sync::Mutex<Vec<TeamMember>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryStore {
    fn list(&self) -> Result<Vec<TeamMember>> {
        Ok(self.rows.lock().map_err(poisoned)?.clone())
    }

    fn get_by_email(&self, email: &str) -> Result<Option<TeamMember>> {
        let key = email.to_lowercase();
        Ok(self
            .rows
            .lock()
            .map_err(poisoned)?
            .iter()
            .find(|m| m.email_key() == key)
            .cloned())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<TeamMember>> {
        Ok(self
            .rows
            .lock()
            .map_err(poisoned)?
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    fn upsert(&self, member: &TeamMember) -> Result<()> {
        let mut rows = self.rows.lock().map_err(poisoned)?;
        let key = member.email_key();
        match rows.iter_mut().find(|m| m.email_key() == key) {
            Some(slot) => *slot = member.clone(),
            None => rows.push(member.clone()),
        }
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> TeamlensError {
    TeamlensError::Store("memory store lock poisoned".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::{BigFive, CommunicationStyle, UserManual};
    use tempfile::TempDir;

    fn member(id: &str, name: &str, email: &str) -> TeamMember {
        TeamMember {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: None,
            avatar: None,
            mbti: "INTJ".into(),
            disc: String::new(),
            enneagram: String::new(),
            clifton_strengths: vec!["Strategic".into()],
            big_five: BigFive::default(),
            communication_style: CommunicationStyle::default(),
            user_manual: UserManual::default(),
            ideal_collaborator: String::new(),
            full_profile: String::new(),
        }
    }

    fn open_tmp() -> (TempDir, RedbStore) {
        let dir = TempDir::new().unwrap();
        let store = RedbStore::open(&dir.path().join("profiles.redb")).unwrap();
        (dir, store)
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let (_dir, store) = open_tmp();
        let m = member("ada-lovelace", "Ada Lovelace", "ada@casperstudios.xyz");
        store.upsert(&m).unwrap();
        assert_eq!(store.get_by_email("ada@casperstudios.xyz").unwrap(), Some(m));
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let (_dir, store) = open_tmp();
        let m = member("ada-lovelace", "Ada Lovelace", "Ada@CasperStudios.xyz");
        store.upsert(&m).unwrap();
        assert!(store.get_by_email("ada@casperstudios.xyz").unwrap().is_some());
        assert!(store.get_by_email("ADA@casperstudios.XYZ").unwrap().is_some());
    }

    #[test]
    fn upsert_replaces_whole_record() {
        let (_dir, store) = open_tmp();
        let mut m = member("ada-lovelace", "Ada Lovelace", "ada@casperstudios.xyz");
        m.role = Some("Engineer".into());
        store.upsert(&m).unwrap();

        // Re-save without the role: nothing from the old record survives.
        let replacement = member("ada-lovelace", "Ada Lovelace", "ada@casperstudios.xyz");
        store.upsert(&replacement).unwrap();
        let read = store.get_by_email("ada@casperstudios.xyz").unwrap().unwrap();
        assert_eq!(read.role, None);
        assert_eq!(read, replacement);
    }

    #[test]
    fn list_preserves_insertion_order_across_replacement() {
        let (_dir, store) = open_tmp();
        store
            .upsert(&member("zed-a", "Zed A", "zed@casperstudios.xyz"))
            .unwrap();
        store
            .upsert(&member("ada-b", "Ada B", "ada@casperstudios.xyz"))
            .unwrap();
        // Replacing the first record must not move it to the end.
        store
            .upsert(&member("zed-a2", "Zed A", "zed@casperstudios.xyz"))
            .unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["zed-a2".to_string(), "ada-b".to_string()]);
    }

    #[test]
    fn reslugged_upsert_orphans_old_id() {
        let (_dir, store) = open_tmp();
        store
            .upsert(&member("leo-kim", "Leo Kim", "leo@casperstudios.xyz"))
            .unwrap();
        store
            .upsert(&member("leo-k", "Leo K", "leo@casperstudios.xyz"))
            .unwrap();

        assert!(store.get_by_id("leo-kim").unwrap().is_none());
        assert_eq!(
            store.get_by_id("leo-k").unwrap().map(|m| m.id),
            Some("leo-k".to_string())
        );
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn two_saves_same_email_yield_one_record() {
        let (_dir, store) = open_tmp();
        store
            .upsert(&member("one", "One", "same@casperstudios.xyz"))
            .unwrap();
        store
            .upsert(&member("two", "Two", "same@casperstudios.xyz"))
            .unwrap();
        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "two");
    }

    #[test]
    fn get_by_id_missing_returns_none() {
        let (_dir, store) = open_tmp();
        assert!(store.get_by_id("nobody").unwrap().is_none());
    }

    #[test]
    fn store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profiles.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store
                .upsert(&member("ada-lovelace", "Ada", "ada@casperstudios.xyz"))
                .unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
        assert!(store.get_by_id("ada-lovelace").unwrap().is_some());
    }

    #[test]
    fn memory_store_matches_redb_semantics() {
        let store = MemoryStore::new();
        store
            .upsert(&member("one", "One", "a@casperstudios.xyz"))
            .unwrap();
        store
            .upsert(&member("two", "Two", "A@casperstudios.xyz"))
            .unwrap();
        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "two");
    }
}
