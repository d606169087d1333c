use serde::Serialize;

use topic_core::model::{LearnedEntry, TopicKey, TopicRecord};

/// Presentation-agnostic card for one topic on the daily board.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// The shell decides how to show the learned date and the note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicCard {
    pub topic: TopicRecord,
    pub learned: Option<LearnedEntry>,
    /// Saved note, empty when none.
    pub note: String,
}

impl TopicCard {
    #[must_use]
    pub fn key(&self) -> TopicKey {
        self.topic.key()
    }

    #[must_use]
    pub fn is_learned(&self) -> bool {
        self.learned.is_some()
    }
}
