//! Shared error types for the services crate.

use thiserror::Error;

use topic_core::model::SettingsError;
use topic_core::selector::SelectionError;

/// Errors emitted by `DailyTopicService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TopicServiceError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("failed to export progress: {0}")]
    Export(#[from] serde_json::Error),
}

/// Errors emitted by `AppServices` when validating raw shell input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Topics(#[from] TopicServiceError),
}
