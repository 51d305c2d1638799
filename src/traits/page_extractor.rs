use async_trait::async_trait;
use serde_json::Value;

/// Result of a managed page fetch plus schema-guided extraction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionOutcome {
    pub success: bool,
    pub extracted_payload: String,
    pub error: String,
}

impl ExtractionOutcome {
    pub fn success(payload: impl Into<String>) -> Self {
        ExtractionOutcome {
            success: true,
            extracted_payload: payload.into(),
            error: String::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ExtractionOutcome {
            success: false,
            extracted_payload: String::new(),
            error: error.into(),
        }
    }
}

/// Fetches a page, bypassing caches, and extracts data matching `schema`.
///
/// Failures are reported in the outcome rather than as `Err`.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    async fn fetch_and_extract(
        &self,
        url: &str,
        schema: &Value,
        instruction: &str,
    ) -> ExtractionOutcome;
}
