pub mod language_model;
pub mod feed_search;
pub mod page_extractor;
pub mod fact_checker;

// Re-export traits
pub use language_model::LanguageModel;
pub use feed_search::{FeedEntry, FeedSearch};
pub use page_extractor::{ExtractionOutcome, PageExtractor};
pub use fact_checker::FactChecker;
