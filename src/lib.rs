pub mod models;
pub mod traits;
pub mod errors;
pub mod implementations;
#[cfg(test)]
mod tests;

// Re-export core components
pub use errors::{ ClientError, ErrorClass, FactCheckError, FactCheckResult, RecoverableError };
pub use implementations::config::{ CheckerConfig, ConfigError, PipelineConfig };
pub use implementations::content_extractor::ContentExtractor;
pub use implementations::context_refiner::ContextRefiner;
pub use implementations::evidence_discovery::EvidenceDiscovery;
pub use implementations::llm_client::ChatCompletionsClient;
pub use implementations::news_feed::NewsFeedSearch;
pub use implementations::page_fetcher::LlmPageExtractor;
pub use implementations::pipeline::FactCheckPipeline;
pub use implementations::response_parser::{ parse_or_default, parse_structured, Parsed };
pub use implementations::verifier::Verifier;
pub use models::{
    claim::{ Claim, RefinedContext },
    article::{ ArticleContent, ArticleLink, ContentStatus },
    verdict::Verdict,
    report::{ Report, FACT_CHECK_RESOURCES },
};
pub use traits::{
    ExtractionOutcome,
    FactChecker,
    FeedEntry,
    FeedSearch,
    LanguageModel,
    PageExtractor,
};
