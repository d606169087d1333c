#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod selector;
pub mod time;

pub use catalog::{Catalog, CatalogError, CategoryEntry, TopicEntry};
pub use error::Error;
pub use selector::{SampleSeed, SelectionError, flatten, sample};
pub use time::Clock;
