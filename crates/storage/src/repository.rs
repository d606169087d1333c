use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use topic_core::model::{LearnedEntry, ProgressSummary, SeenRecord, TopicKey};

/// Repository contract for learning progress.
///
/// Progress lives for one session and is driven by a single thread of control,
/// so mutators take `&mut self` and nothing here can fail.
pub trait ProgressRepository {
    /// Append a render of `key`. Repeated renders append repeated records.
    fn record_seen(&mut self, key: TopicKey, date: NaiveDate);

    /// Insert or overwrite the learned entry for `key`.
    fn mark_learned(&mut self, key: TopicKey, learned_on: NaiveDate);

    /// Remove the learned entry for `key`, returning it if one existed.
    fn unmark_learned(&mut self, key: &TopicKey) -> Option<LearnedEntry>;

    /// Store `text` as the note for `key`, replacing any previous note.
    ///
    /// An empty string is a real save, not a delete.
    fn save_note(&mut self, key: TopicKey, text: String);

    /// Clear seen history, learned entries and notes together.
    fn reset(&mut self);

    fn learned_status(&self, key: &TopicKey) -> Option<&LearnedEntry>;

    fn note(&self, key: &TopicKey) -> Option<&str>;

    /// Seen records in append order.
    fn seen_history(&self) -> &[SeenRecord];

    /// Learned entries ordered by key.
    fn learned_entries(&self) -> Vec<(&TopicKey, &LearnedEntry)>;

    /// Saved notes ordered by key.
    fn notes(&self) -> Vec<(&TopicKey, &str)>;

    /// Number of distinct topics across the seen history.
    fn distinct_seen_count(&self) -> usize {
        self.seen_history()
            .iter()
            .map(|record| &record.key)
            .collect::<HashSet<_>>()
            .len()
    }

    fn learned_count(&self) -> usize {
        self.learned_entries().len()
    }

    fn summary(&self) -> ProgressSummary {
        ProgressSummary {
            distinct_seen: self.distinct_seen_count(),
            learned: self.learned_count(),
        }
    }

    /// Capture the current state for export.
    fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            summary: self.summary(),
            seen: self.seen_history().to_vec(),
            learned: self
                .learned_entries()
                .into_iter()
                .map(|(key, entry)| LearnedRow {
                    category: key.category().to_owned(),
                    title: key.title().to_owned(),
                    learned_on: entry.learned_on,
                })
                .collect(),
            notes: self
                .notes()
                .into_iter()
                .map(|(key, text)| NoteRow {
                    category: key.category().to_owned(),
                    title: key.title().to_owned(),
                    text: text.to_owned(),
                })
                .collect(),
        }
    }
}

/// Learned entry flattened for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedRow {
    pub category: String,
    pub title: String,
    pub learned_on: NaiveDate,
}

/// Note flattened for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRow {
    pub category: String,
    pub title: String,
    pub text: String,
}

/// Point-in-time copy of all progress, suitable for serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub summary: ProgressSummary,
    pub seen: Vec<SeenRecord>,
    pub learned: Vec<LearnedRow>,
    pub notes: Vec<NoteRow>,
}

/// Session-scoped progress store. Everything is dropped with the value.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressStore {
    seen: Vec<SeenRecord>,
    learned: BTreeMap<TopicKey, LearnedEntry>,
    notes: BTreeMap<TopicKey, String>,
}

impl InMemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no progress of any kind is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty() && self.learned.is_empty() && self.notes.is_empty()
    }
}

impl ProgressRepository for InMemoryProgressStore {
    fn record_seen(&mut self, key: TopicKey, date: NaiveDate) {
        self.seen.push(SeenRecord::new(key, date));
    }

    fn mark_learned(&mut self, key: TopicKey, learned_on: NaiveDate) {
        let entry = LearnedEntry::new(key.category(), learned_on);
        self.learned.insert(key, entry);
    }

    fn unmark_learned(&mut self, key: &TopicKey) -> Option<LearnedEntry> {
        self.learned.remove(key)
    }

    fn save_note(&mut self, key: TopicKey, text: String) {
        self.notes.insert(key, text);
    }

    fn reset(&mut self) {
        self.seen.clear();
        self.learned.clear();
        self.notes.clear();
    }

    fn learned_status(&self, key: &TopicKey) -> Option<&LearnedEntry> {
        self.learned.get(key)
    }

    fn note(&self, key: &TopicKey) -> Option<&str> {
        self.notes.get(key).map(String::as_str)
    }

    fn seen_history(&self) -> &[SeenRecord] {
        &self.seen
    }

    fn learned_entries(&self) -> Vec<(&TopicKey, &LearnedEntry)> {
        self.learned.iter().collect()
    }

    fn notes(&self) -> Vec<(&TopicKey, &str)> {
        self.notes
            .iter()
            .map(|(key, text)| (key, text.as_str()))
            .collect()
    }

    fn learned_count(&self) -> usize {
        self.learned.len()
    }
}
