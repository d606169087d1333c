mod progress;
mod settings;
mod topic;

pub use progress::{LearnedEntry, ProgressSummary, SeenRecord};
pub use settings::{MAX_PER_CATEGORY, SelectionSettings, SettingsError};
pub use topic::{TopicKey, TopicRecord};
