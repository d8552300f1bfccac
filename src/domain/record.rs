use crate::domain::format_clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted title → `HH:MM:SS` mapping. Keys stay sorted so the file on disk
/// is deterministic and easy to edit by hand.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaytimeRecord {
    entries: BTreeMap<String, String>,
}

impl PlaytimeRecord {
    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries.get(title).map(|value| value.as_str())
    }

    pub fn set(&mut self, title: &str, seconds: u64) {
        self.entries.insert(title.to_string(), format_clock(seconds));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, String)> for PlaytimeRecord {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
