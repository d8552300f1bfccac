use crate::domain::{
    CLOCK_HEADER, MalformedDuration, PlaytimeRecord, format_clock, parse_clock,
};
use std::path::PathBuf;

/// A directory entry found while scanning the configured game directories.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiscoveredGame {
    pub title: String,
    pub path: PathBuf,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameEntry {
    pub title: String,
    pub path: PathBuf,
    pub playtime_secs: u64,
}

impl GameEntry {
    pub fn playtime_clock(&self) -> String {
        format_clock(self.playtime_secs)
    }
}

/// A record value for a discovered game that is not a clock.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RejectedPlaytime {
    pub title: String,
    pub error: MalformedDuration,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GameCatalog {
    entries: Vec<GameEntry>,
}

impl GameCatalog {
    /// Merges discovered games with their recorded playtime and sorts them by
    /// lowercased title. Record values that are not clocks are returned with
    /// their titles; those games start from zero.
    ///
    /// Titles found in several directories are kept as separate rows that
    /// share one record key.
    pub fn build(
        discovered: Vec<DiscoveredGame>,
        record: &PlaytimeRecord,
    ) -> (Self, Vec<RejectedPlaytime>) {
        let mut rejected = Vec::new();
        let mut entries = discovered
            .into_iter()
            .map(|game| {
                let playtime_secs = match record.get(&game.title).map(parse_clock) {
                    Some(Ok(seconds)) => seconds,
                    Some(Err(error)) => {
                        rejected.push(RejectedPlaytime {
                            title: game.title.clone(),
                            error,
                        });
                        0
                    }
                    None => 0,
                };
                GameEntry {
                    title: game.title,
                    path: game.path,
                    playtime_secs,
                }
            })
            .collect::<Vec<_>>();

        entries.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        (Self { entries }, rejected)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GameEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[GameEntry] {
        &self.entries
    }

    /// Adds a finished session to the entry and returns the new total.
    pub fn add_playtime(&mut self, index: usize, added_secs: u64) -> Option<u64> {
        let entry = self.entries.get_mut(index)?;
        entry.playtime_secs = entry.playtime_secs.saturating_add(added_secs);
        Some(entry.playtime_secs)
    }

    /// Width of the playtime column: the widest clock string, never narrower
    /// than the `hh:mm:ss` header.
    pub fn playtime_column_width(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.playtime_clock().len())
            .fold(CLOCK_HEADER.len(), usize::max)
    }
}
