use std::sync::Arc;

use topic_core::catalog::Catalog;
use topic_core::model::{SelectionSettings, TopicRecord};
use topic_core::selector::{self, SampleSeed};
use tracing::debug;

use crate::Clock;
use crate::error::TopicServiceError;

/// Picks the topics shown on a given day.
///
/// Owns the time source and a shared, read-only catalog. Holds no mutable state,
/// so repeated calls with the same inputs on the same day agree when `stable` is set.
#[derive(Clone)]
pub struct DailyTopicService {
    clock: Clock,
    catalog: Arc<Catalog>,
}

impl DailyTopicService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>) -> Self {
        Self { clock, catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Category names for the category picker, in catalog order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.catalog.category_names().map(str::to_owned).collect()
    }

    /// Seed that keeps today's pick stable.
    #[must_use]
    pub fn seed_for_today(&self) -> SampleSeed {
        SampleSeed::for_day(self.clock.today())
    }

    /// Flatten the chosen categories and sample up to `per_category` topics from each.
    ///
    /// With `stable` set the pick is seeded by today's date; otherwise it differs
    /// from call to call. An empty or fully unknown category list yields an empty
    /// list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Selection` when `per_category` is zero.
    pub fn generate_daily_topics<S: AsRef<str>>(
        &self,
        categories: &[S],
        per_category: u32,
        stable: bool,
    ) -> Result<Vec<TopicRecord>, TopicServiceError> {
        let seed = stable.then(|| self.seed_for_today());
        let records = selector::flatten(&self.catalog, categories);
        let picked = selector::sample(&records, per_category, seed.as_ref())?;

        debug!(
            requested = categories.len(),
            available = records.len(),
            picked = picked.len(),
            per_category,
            seed = seed.as_ref().map(SampleSeed::as_str),
            "generated daily topics"
        );
        Ok(picked)
    }

    /// Same as [`Self::generate_daily_topics`], driven by validated settings.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Selection` if sampling rejects the settings.
    pub fn generate(
        &self,
        settings: &SelectionSettings,
    ) -> Result<Vec<TopicRecord>, TopicServiceError> {
        self.generate_daily_topics(
            settings.categories(),
            settings.per_category(),
            settings.stable(),
        )
    }
}
