pub mod config;
pub mod response_parser;
pub mod llm_client;
pub mod context_refiner;
pub mod news_feed;
pub mod evidence_discovery;
pub mod page_fetcher;
pub mod content_extractor;
pub mod verifier;
pub mod pipeline;
