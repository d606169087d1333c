use storage::repository::{InMemoryProgressStore, ProgressRepository, ProgressSnapshot};
use topic_core::model::{LearnedEntry, ProgressSummary, SeenRecord, TopicKey, TopicRecord};
use tracing::{debug, info};

use crate::Clock;
use crate::error::ProgressServiceError;
use crate::view::TopicCard;

/// Presentation-facing facade over the progress store.
///
/// This service owns:
/// - the time source (`Clock`) that dates learned entries and seen records
/// - the session's progress repository
///
/// It is created at session start and dropped at session end; callers hold it
/// explicitly instead of reaching for shared state.
#[derive(Debug, Clone)]
pub struct ProgressService<R = InMemoryProgressStore> {
    clock: Clock,
    store: R,
}

impl ProgressService<InMemoryProgressStore> {
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, InMemoryProgressStore::new())
    }
}

impl<R: ProgressRepository> ProgressService<R> {
    #[must_use]
    pub fn new(clock: Clock, store: R) -> Self {
        Self { clock, store }
    }

    #[must_use]
    pub fn store(&self) -> &R {
        &self.store
    }

    /// Note that `topic` was rendered today.
    pub fn record_seen(&mut self, topic: &TopicKey) {
        self.store.record_seen(topic.clone(), self.clock.today());
    }

    /// Mark `topic` learned today, replacing any earlier date.
    pub fn mark_learned(&mut self, topic: &TopicKey) -> LearnedEntry {
        let today = self.clock.today();
        self.store.mark_learned(topic.clone(), today);
        debug!(category = topic.category(), title = topic.title(), %today, "marked learned");
        LearnedEntry::new(topic.category(), today)
    }

    /// Returns `true` if an entry was removed.
    pub fn unmark_learned(&mut self, topic: &TopicKey) -> bool {
        let removed = self.store.unmark_learned(topic).is_some();
        debug!(
            category = topic.category(),
            title = topic.title(),
            removed,
            "unmarked learned"
        );
        removed
    }

    /// Flip the learned state, returning the new entry when the topic is now learned.
    pub fn toggle_learned(&mut self, topic: &TopicKey) -> Option<LearnedEntry> {
        if self.store.learned_status(topic).is_some() {
            self.unmark_learned(topic);
            None
        } else {
            Some(self.mark_learned(topic))
        }
    }

    /// Save `text` as the note for `topic`. Empty text is stored as-is.
    pub fn save_note(&mut self, topic: &TopicKey, text: impl Into<String>) {
        let text = text.into();
        debug!(
            category = topic.category(),
            title = topic.title(),
            chars = text.chars().count(),
            "saved note"
        );
        self.store.save_note(topic.clone(), text);
    }

    /// Drop all seen history, learned entries and notes.
    pub fn reset_progress(&mut self) {
        let before = self.store.summary();
        self.store.reset();
        info!(
            seen = before.distinct_seen,
            learned = before.learned,
            "progress cleared"
        );
    }

    #[must_use]
    pub fn learned_status(&self, topic: &TopicKey) -> Option<&LearnedEntry> {
        self.store.learned_status(topic)
    }

    /// Saved note, or an empty string when none was saved.
    #[must_use]
    pub fn note(&self, topic: &TopicKey) -> &str {
        self.store.note(topic).unwrap_or_default()
    }

    #[must_use]
    pub fn summary(&self) -> ProgressSummary {
        self.store.summary()
    }

    #[must_use]
    pub fn history(&self) -> &[SeenRecord] {
        self.store.seen_history()
    }

    /// Assemble the per-topic view from independent status and note lookups.
    #[must_use]
    pub fn card_for(&self, topic: &TopicRecord) -> TopicCard {
        let key = topic.key();
        TopicCard {
            learned: self.learned_status(&key).cloned(),
            note: self.note(&key).to_owned(),
            topic: topic.clone(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.store.snapshot()
    }

    /// Pretty-printed JSON dump of the current progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Export` if serialization fails.
    pub fn export_json(&self) -> Result<String, ProgressServiceError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
