use std::sync::Arc;

use storage::repository::{InMemoryProgressStore, ProgressRepository};
use topic_core::catalog::Catalog;
use topic_core::model::{SelectionSettings, TopicRecord};

use crate::Clock;
use crate::error::{AppServicesError, TopicServiceError};
use crate::progress_service::ProgressService;
use crate::topic_service::DailyTopicService;
use crate::view::TopicCard;

/// Assembles app-facing services for one user session.
///
/// The shell builds this once at startup and hands it to every handler by
/// reference; dropping it ends the session and discards progress.
pub struct AppServices<R = InMemoryProgressStore> {
    topics: DailyTopicService,
    progress: ProgressService<R>,
}

impl AppServices<InMemoryProgressStore> {
    /// Build services backed by session-scoped, in-memory progress.
    #[must_use]
    pub fn in_memory(clock: Clock, catalog: Catalog) -> Self {
        Self::new(
            DailyTopicService::new(clock, Arc::new(catalog)),
            ProgressService::in_memory(clock),
        )
    }
}

impl<R: ProgressRepository> AppServices<R> {
    #[must_use]
    pub fn new(topics: DailyTopicService, progress: ProgressService<R>) -> Self {
        Self { topics, progress }
    }

    #[must_use]
    pub fn topics(&self) -> &DailyTopicService {
        &self.topics
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressService<R> {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressService<R> {
        &mut self.progress
    }

    /// Render today's board.
    ///
    /// Picks topics for `settings`, records each one as seen and returns a card per
    /// topic carrying its current learned status and note.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError` if topic selection fails.
    pub fn daily_board(
        &mut self,
        settings: &SelectionSettings,
    ) -> Result<Vec<TopicCard>, TopicServiceError> {
        let topics = self.topics.generate(settings)?;
        Ok(self.render(&topics))
    }

    /// Validate raw control values, then render the board.
    ///
    /// Returns the accepted settings alongside the cards so callers can keep them.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Settings` for an empty category list or an
    /// out-of-range count, and `AppServicesError::Topics` if selection fails.
    pub fn board_for<S: AsRef<str>>(
        &mut self,
        categories: &[S],
        per_category: u32,
        stable: bool,
    ) -> Result<(SelectionSettings, Vec<TopicCard>), AppServicesError> {
        let settings = SelectionSettings::new(
            categories.iter().map(|c| c.as_ref().to_owned()).collect(),
            per_category,
            stable,
        )?;
        let board = self.daily_board(&settings)?;
        Ok((settings, board))
    }

    /// Build cards for already-selected topics and record them as seen.
    pub fn render(&mut self, topics: &[TopicRecord]) -> Vec<TopicCard> {
        topics
            .iter()
            .map(|topic| {
                let card = self.progress.card_for(topic);
                self.progress.record_seen(&card.key());
                card
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topic_core::model::SettingsError;
    use topic_core::time::fixed_clock;

    #[test]
    fn board_records_every_rendered_topic() {
        let catalog = Catalog::builtin();
        let settings = SelectionSettings::default_for(&catalog);
        let mut app = AppServices::in_memory(fixed_clock(), catalog);

        let board = app.daily_board(&settings).unwrap();
        assert_eq!(board.len(), 6);
        assert_eq!(app.progress().history().len(), 6);
        assert_eq!(app.progress().summary().distinct_seen, 6);

        // Same day, same pick: rendering again appends but does not grow the distinct count.
        let again = app.daily_board(&settings).unwrap();
        assert_eq!(again, board);
        assert_eq!(app.progress().history().len(), 12);
        assert_eq!(app.progress().summary().distinct_seen, 6);
    }

    #[test]
    fn board_shows_learned_state_on_next_render() {
        let catalog = Catalog::builtin();
        let settings = SelectionSettings::new(vec!["SQL".into()], 2, true).unwrap();
        let mut app = AppServices::in_memory(fixed_clock(), catalog);

        let board = app.daily_board(&settings).unwrap();
        assert!(board.iter().all(|c| !c.is_learned()));

        let first = board[0].key();
        app.progress_mut().mark_learned(&first);
        app.progress_mut().save_note(&first, "ON vs USING");

        let board = app.daily_board(&settings).unwrap();
        let card = board.iter().find(|c| c.key() == first).unwrap();
        assert!(card.is_learned());
        assert_eq!(card.note, "ON vs USING");
        assert_eq!(app.progress().summary().learned, 1);
    }

    #[test]
    fn raw_controls_are_validated() {
        let mut app = AppServices::in_memory(fixed_clock(), Catalog::builtin());
        let none: [&str; 0] = [];
        assert!(matches!(
            app.board_for(&none, 1, true),
            Err(AppServicesError::Settings(SettingsError::NoCategories))
        ));
        assert!(matches!(
            app.board_for(&["NLP"], 9, true),
            Err(AppServicesError::Settings(
                SettingsError::PerCategoryOutOfRange { provided: 9 }
            ))
        ));
        let (settings, board) = app.board_for(&["NLP"], 3, false).unwrap();
        assert_eq!(settings.categories(), ["NLP"]);
        assert!(!settings.stable());
        assert_eq!(board.len(), 3);
    }
}
