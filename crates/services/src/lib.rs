#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod topic_service;
pub mod view;

pub use topic_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProgressServiceError, TopicServiceError};
pub use progress_service::ProgressService;
pub use topic_service::DailyTopicService;
pub use view::TopicCard;
