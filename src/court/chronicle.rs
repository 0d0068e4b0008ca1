//! Narrative log of court events
//!
//! The court reports what happened as one-line news items. Delivery is
//! fire-and-forget: the court never reads anything back from the sink.

use serde::{Deserialize, Serialize};

use crate::core::types::Day;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsCategory {
    /// Throne challenges, crownings, depositions
    Royal,
    /// City control changing hands
    Team,
    /// Sentences and releases
    Prison,
}

/// Anything that accepts narrative news lines
pub trait NarrativeSink {
    fn record(&mut self, category: NewsCategory, message: String);
}

/// Sink that drops everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NarrativeSink for NullSink {
    fn record(&mut self, _category: NewsCategory, _message: String) {}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewsEntry {
    pub id: u32,
    pub day: Day,
    pub category: NewsCategory,
    pub message: String,
}

/// In-memory news log
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Chronicle {
    pub entries: Vec<NewsEntry>,
    /// Day stamped on new entries
    pub day: Day,
    next_entry_id: u32,
}

impl Chronicle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries_for_day(&self, day: Day) -> impl Iterator<Item = &NewsEntry> {
        self.entries.iter().filter(move |e| e.day == day)
    }

    pub fn entries_in(&self, category: NewsCategory) -> impl Iterator<Item = &NewsEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NarrativeSink for Chronicle {
    fn record(&mut self, category: NewsCategory, message: String) {
        let id = self.next_entry_id;
        self.next_entry_id += 1;

        self.entries.push(NewsEntry {
            id,
            day: self.day,
            category,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chronicle_stamps_day_and_ids() {
        let mut log = Chronicle::new();
        log.record(NewsCategory::Royal, "A new king".into());
        log.day = 3;
        log.record(NewsCategory::Prison, "Jailed".into());

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries[1].id, 1);
        assert_eq!(log.entries_for_day(3).count(), 1);
        assert_eq!(log.entries_in(NewsCategory::Royal).count(), 1);
    }
}
