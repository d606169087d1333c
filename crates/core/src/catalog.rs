use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    #[error("category `{name}` is listed more than once")]
    DuplicateCategory { name: String },

    #[error("topic title cannot be empty (category `{category}`)")]
    EmptyTopicTitle { category: String },

    #[error("topic `{title}` is listed more than once in category `{category}`")]
    DuplicateTopic { category: String, title: String },
}

//
// ─── ENTRIES ───────────────────────────────────────────────────────────────────
//

/// A title and its one-line description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub title: String,
    pub description: String,
}

/// A named group of topics, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<TopicEntry>,
}

/// On-disk shape of a catalog, checked by `Catalog::new` on conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    categories: Vec<CategoryEntry>,
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable mapping of category → (title → description).
///
/// Category order and topic order are insertion order and are observable: the
/// category control lists categories in this order and flattening emits topics
/// in this order.
///
/// Lookups never fail. Unknown categories behave as empty categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile")]
pub struct Catalog {
    categories: Vec<CategoryEntry>,
}

const BUILTIN: &[(&str, &[(&str, &str)])] = &[
    (
        "Python",
        &[
            ("List Comprehensions", "Concise syntax for creating lists."),
            (
                "Decorators",
                "Functions that modify other functions without changing their source code.",
            ),
            ("Generators", "Lazy iterators built with yield."),
            ("Context Managers", "Use with statements to manage resources."),
        ],
    ),
    (
        "Data Science",
        &[
            (
                "EDA (Exploratory Data Analysis)",
                "Techniques to summarize main characteristics of data.",
            ),
            (
                "Feature Engineering",
                "Create features to improve model performance.",
            ),
            ("Model Evaluation", "Metrics and validation strategies."),
        ],
    ),
    (
        "Machine Learning",
        &[
            (
                "Linear Regression",
                "Predict continuous targets using linear models.",
            ),
            (
                "Regularization (L1/L2)",
                "Penalize large weights to avoid overfitting.",
            ),
            ("Decision Trees", "Non-linear models using tree structures."),
            ("Cross Validation", "Robust evaluation through data splits."),
        ],
    ),
    (
        "NLP",
        &[
            ("Tokenization", "Splitting text into tokens."),
            ("Word Embeddings", "Map words to vectors."),
            (
                "Transformer Architecture",
                "Self-attention based models for language tasks.",
            ),
        ],
    ),
    (
        "SQL",
        &[
            ("JOINs", "Combine rows from two or more tables."),
            (
                "Window Functions",
                "Perform calculations across sets of rows related to the current row.",
            ),
        ],
    ),
    (
        "Power BI",
        &[
            ("DAX Basics", "Data Analysis Expressions for calculations."),
            ("Data Modeling", "Relationships and star schemas."),
        ],
    ),
];

impl Catalog {
    /// Creates a catalog after checking name and title uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a category name is empty or repeated, or if a
    /// topic title is empty or repeated within its category.
    pub fn new(categories: Vec<CategoryEntry>) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();
        for category in &categories {
            if category.name.trim().is_empty() {
                return Err(CatalogError::EmptyCategoryName);
            }
            if !names.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateCategory {
                    name: category.name.clone(),
                });
            }

            let mut titles = HashSet::new();
            for topic in &category.topics {
                if topic.title.trim().is_empty() {
                    return Err(CatalogError::EmptyTopicTitle {
                        category: category.name.clone(),
                    });
                }
                if !titles.insert(topic.title.as_str()) {
                    return Err(CatalogError::DuplicateTopic {
                        category: category.name.clone(),
                        title: topic.title.clone(),
                    });
                }
            }
        }

        Ok(Self { categories })
    }

    /// The curated catalog shipped with the app.
    #[must_use]
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, topics)| CategoryEntry {
                name: (*name).to_owned(),
                topics: topics
                    .iter()
                    .map(|(title, description)| TopicEntry {
                        title: (*title).to_owned(),
                        description: (*description).to_owned(),
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    /// Category names in catalog order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn categories(&self) -> &[CategoryEntry] {
        &self.categories
    }

    /// Topics of a category, or an empty slice if the category is unknown.
    #[must_use]
    pub fn topics_in(&self, category: &str) -> &[TopicEntry] {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.topics.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.name == category)
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.categories.iter().map(|c| c.topics.len()).sum()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: CatalogFile) -> Result<Self, Self::Error> {
        Self::new(raw.categories)
    }
}
