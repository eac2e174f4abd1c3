pub mod analytics;
pub mod etl;
pub mod export;
pub mod extractor;
pub mod fetch;
pub mod gallery;
pub mod markup;
pub mod pipeline;
pub mod stats;
pub mod universe;

pub use crate::domain::model::{Character, CharacterBatch, Group, ScrapeOutcome, Stats};
pub use crate::domain::ports::{ConfigProvider, ExportBundle, Pipeline, Storage};
pub use crate::utils::error::Result;
