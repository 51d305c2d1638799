use chrono::{ DateTime, Utc };
use serde::Serialize;
use std::time::Duration;

use crate::models::article::ArticleContent;
use crate::models::claim::{ Claim, RefinedContext };
use crate::models::verdict::Verdict;

/// Fact-checking resources appended to every report
pub const FACT_CHECK_RESOURCES: [&str; 5] = [
    "FactCheck.org",
    "Snopes",
    "PolitiFact",
    "Reuters Fact Check",
    "AP Fact Check",
];

/// Aggregate outcome of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub claim: Claim,
    pub refined: RefinedContext,
    pub articles: Vec<ArticleContent>,
    /// Either a verdict or the fatal error that stopped the run before one existed
    pub verdict: Result<Verdict, String>,
    pub resources: Vec<String>,
    pub checked_at: DateTime<Utc>,
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

impl Report {
    /// Number of articles that contributed evidence text
    pub fn usable_evidence_count(&self) -> usize {
        self.articles.iter().filter(|a| a.is_usable()).count()
    }

    pub fn error(&self) -> Option<&str> {
        self.verdict.as_ref().err().map(String::as_str)
    }
}

pub fn fact_check_resources() -> Vec<String> {
    FACT_CHECK_RESOURCES.iter().map(|r| r.to_string()).collect()
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}
