use async_trait::async_trait;

use crate::errors::FactCheckResult;
use crate::models::{ Claim, Report };

/// Entry points exposed to the UI/API layer
#[async_trait]
pub trait FactChecker: Send + Sync {
    /// Run the full pipeline. Never fails: fatal problems are attached to the report.
    async fn run_fact_check(&self, claim: &Claim) -> Report;

    /// Summarize a transcript in a single model call
    async fn summarize(&self, transcript: &str) -> FactCheckResult<String>;
}
