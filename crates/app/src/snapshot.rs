//! Entry snapshots as exported by the data store.
use std::path::Path;

use engine::{Entry, Roster};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The members and the entries visible at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub roster: Roster,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        tracing::info!(
            "loaded {} entries and {} members from {}",
            snapshot.entries.len(),
            snapshot.roster.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Display name of a member, preferring the roster over the name stored
    /// on their entries.
    pub fn member_name<'a>(&'a self, member_id: &'a str) -> &'a str {
        self.roster
            .name(member_id)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|entry| {
                        entry.owner_id.trim() == member_id && !entry.owner_name.is_empty()
                    })
                    .map(|entry| entry.owner_name.as_str())
            })
            .unwrap_or(member_id)
    }
}
