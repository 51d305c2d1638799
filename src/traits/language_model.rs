use async_trait::async_trait;

use crate::errors::ClientError;

/// A text-completion service
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a single user prompt; no streaming
    async fn complete(
        &self,
        prompt: &str,
        model_id: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String, ClientError>;
}
