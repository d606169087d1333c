use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a topic inside the catalog.
///
/// Titles are only unique within a category, so progress state is keyed by the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TopicKey {
    category: String,
    title: String,
}

impl TopicKey {
    #[must_use]
    pub fn new(category: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.category, self.title)
    }
}

/// A single topic as handed to the presentation layer.
///
/// Built from the catalog on every selection request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub category: String,
    pub title: String,
    pub description: String,
}

impl TopicRecord {
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Returns the progress key for this topic.
    #[must_use]
    pub fn key(&self) -> TopicKey {
        TopicKey::new(self.category.as_str(), self.title.as_str())
    }
}
