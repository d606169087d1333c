use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;

/// Upper bound offered by the per-category control.
pub const MAX_PER_CATEGORY: u32 = 5;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("topics per category must be between 1 and 5, got {provided}")]
    PerCategoryOutOfRange { provided: u32 },

    #[error("at least one category must be selected")]
    NoCategories,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// What the user asked to see today.
///
/// Mirrors the sidebar controls: a category subset, how many topics per category,
/// and whether the pick should stay stable for the whole day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSettings {
    categories: Vec<String>,
    per_category: u32,
    stable: bool,
}

impl SelectionSettings {
    /// Creates validated selection settings.
    ///
    /// Category names are not checked against a catalog; unknown names simply
    /// contribute nothing when topics are generated.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::NoCategories` for an empty category list and
    /// `SettingsError::PerCategoryOutOfRange` when `per_category` is outside
    /// `1..=MAX_PER_CATEGORY`.
    pub fn new(
        categories: Vec<String>,
        per_category: u32,
        stable: bool,
    ) -> Result<Self, SettingsError> {
        if categories.is_empty() {
            return Err(SettingsError::NoCategories);
        }
        if !(1..=MAX_PER_CATEGORY).contains(&per_category) {
            return Err(SettingsError::PerCategoryOutOfRange {
                provided: per_category,
            });
        }
        Ok(Self {
            categories,
            per_category,
            stable,
        })
    }

    /// Every catalog category, one topic each, stable for the day.
    #[must_use]
    pub fn default_for(catalog: &Catalog) -> Self {
        Self {
            categories: catalog.category_names().map(str::to_owned).collect(),
            per_category: 1,
            stable: true,
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn per_category(&self) -> u32 {
        self.per_category
    }

    /// When true, the pick is seeded by today's date.
    #[must_use]
    pub fn stable(&self) -> bool {
        self.stable
    }
}
