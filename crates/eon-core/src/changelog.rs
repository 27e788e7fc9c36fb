//! Change log shown on the page and the seed entries served by the API.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use eon_types::{ChangeTrigger, ChangelogEntry};

/// Number of entries the page keeps on screen.
pub const DISPLAY_CAPACITY: usize = 5;

/// Messages the platform starts with, oldest first.
pub const SEED_MESSAGES: [&str; 3] = [
    "Platform initialized \u{2013} v1.0.0",
    "Interactive canvas system activated",
    "Growth tracking mechanism implemented",
];

/// Hours before "now" at which each seed message is dated by the API.
const SEED_AGE_HOURS: [i64; 3] = [24, 12, 0];

/// The changelog entries the API always serves first.
pub fn seed_entries(now: DateTime<Utc>) -> Vec<ChangelogEntry> {
    SEED_MESSAGES
        .iter()
        .zip(SEED_AGE_HOURS)
        .zip(1_u32..)
        .map(|((message, hours), id)| ChangelogEntry {
            id: id.to_string(),
            message: (*message).to_owned(),
            timestamp: now - Duration::hours(hours),
            triggered_by: ChangeTrigger::System,
        })
        .collect()
}

/// A message in the on-page change log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogItem {
    /// When it was added.
    pub time: DateTime<Utc>,
    /// What changed.
    pub message: String,
}

/// Most-recent-first log that keeps at most `capacity` items.
#[derive(Debug, Clone)]
pub struct ChangeLog {
    items: VecDeque<ChangeLogItem>,
    capacity: usize,
}

impl ChangeLog {
    /// An empty log holding at most `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// A display-sized log seeded with [`SEED_MESSAGES`].
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let mut log = Self::with_capacity(DISPLAY_CAPACITY);
        for message in SEED_MESSAGES {
            log.push(message, now);
        }
        log
    }

    /// Add a message at the front, evicting the oldest past capacity.
    pub fn push(&mut self, message: impl Into<String>, time: DateTime<Utc>) {
        self.items.push_front(ChangeLogItem {
            time,
            message: message.into(),
        });
        self.items.truncate(self.capacity);
    }

    /// Items, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeLogItem> {
        self.items.iter()
    }

    /// The newest item.
    pub fn latest(&self) -> Option<&ChangeLogItem> {
        self.items.front()
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_five_most_recent() {
        let now = Utc::now();
        let mut log = ChangeLog::seeded(now);
        assert_eq!(log.len(), 3);
        for i in 0..4 {
            log.push(format!("change {i}"), now);
        }
        assert_eq!(log.len(), DISPLAY_CAPACITY);
        let messages: Vec<&str> = log.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "change 3",
                "change 2",
                "change 1",
                "change 0",
                "Growth tracking mechanism implemented",
            ]
        );
    }

    #[test]
    fn seed_entries_are_dated_relative_to_now() {
        let now = Utc::now();
        let entries = seed_entries(now);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(entries.first().map(|e| e.timestamp), Some(now - Duration::hours(24)));
        assert_eq!(entries.last().map(|e| e.timestamp), Some(now));
        assert!(entries.iter().all(|e| e.triggered_by == ChangeTrigger::System));
    }
}
