use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Members known to the household, keyed by member id with their display
/// name. Ordered by id so everything derived from it is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(BTreeMap<String, String>);

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or renames a member. Ids are stored trimmed and blank ids are
    /// ignored.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let id = id.into();
        let id = id.trim();
        if id.is_empty() {
            return;
        }
        self.0.insert(id.to_string(), name.into());
    }

    #[must_use]
    pub fn name(&self, id: &str) -> Option<&str> {
        self.0.get(id.trim()).map(String::as_str)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<I, N> FromIterator<(I, N)> for Roster
where
    I: Into<String>,
    N: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (I, N)>>(iter: T) -> Self {
        let mut roster = Roster::new();
        for (id, name) in iter {
            roster.insert(id, name);
        }
        roster
    }
}
