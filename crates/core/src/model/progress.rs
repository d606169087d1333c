use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::topic::TopicKey;

/// Marks a topic as learned on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedEntry {
    pub category: String,
    pub learned_on: NaiveDate,
}

impl LearnedEntry {
    #[must_use]
    pub fn new(category: impl Into<String>, learned_on: NaiveDate) -> Self {
        Self {
            category: category.into(),
            learned_on,
        }
    }
}

/// One render of a topic. Appended on every render, never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenRecord {
    pub date: NaiveDate,
    pub key: TopicKey,
}

impl SeenRecord {
    #[must_use]
    pub fn new(key: TopicKey, date: NaiveDate) -> Self {
        Self { date, key }
    }
}

/// Footer counters shown below the daily board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Distinct topics ever rendered in this session.
    pub distinct_seen: usize,
    pub learned: usize,
}
