pub mod claim;
pub mod article;
pub mod verdict;
pub mod report;

// Re-export common model types
pub use claim::{Claim, RefinedContext};
pub use article::{ArticleContent, ArticleLink, ContentStatus};
pub use verdict::Verdict;
pub use report::{Report, FACT_CHECK_RESOURCES};
