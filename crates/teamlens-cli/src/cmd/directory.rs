use crate::output::{print_json, print_table};
use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use teamlens_core::store::{ProfileStore, RedbStore};
use teamlens_core::Directory;

pub fn run(db: &Path, json: bool) -> anyhow::Result<()> {
    let store = RedbStore::open(db)
        .with_context(|| format!("failed to open profile store at {}", db.display()))?;
    let store: Arc<dyn ProfileStore> = Arc::new(store);
    let saved: Vec<String> = store
        .list()?
        .iter()
        .map(|m| m.email_key())
        .collect();

    let directory = Directory::new(store);
    let members = directory.list_all();
    if json {
        return print_json(&members);
    }

    let rows: Vec<Vec<String>> = members
        .iter()
        .map(|m| {
            let source = if saved.contains(&m.email_key()) {
                "saved"
            } else {
                "builtin"
            };
            vec![
                m.id.clone(),
                m.name.clone(),
                m.email.clone(),
                source.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "EMAIL", "SOURCE"], &rows)
}
