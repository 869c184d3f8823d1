use crate::output::{print_json, print_table};
use teamlens_core::roster;

pub fn run(json: bool) -> anyhow::Result<()> {
    let members = roster::builtin();
    if json {
        return print_json(&members);
    }

    let rows: Vec<Vec<String>> = members
        .iter()
        .map(|m| {
            vec![
                m.id.clone(),
                m.name.clone(),
                m.email.clone(),
                m.role.clone().unwrap_or_default(),
                m.mbti.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "EMAIL", "ROLE", "MBTI"], &rows)
}
