use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };

use crate::errors::ClientError;
use crate::implementations::config::CheckerConfig;
use crate::traits::LanguageModel;

/// OpenAI-compatible chat request and response types
#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ChatResponseChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatResponseChoice>,
}

/// Language model backed by an OpenAI-compatible `/chat/completions` endpoint
/// (Groq by default).
///
/// The API key comes from the configuration or from `GROQ_API_KEY` /
/// `OPENAI_API_KEY`.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http_client: reqwest::Client,
    api_endpoint: String,
    api_key: String,
}

impl ChatCompletionsClient {
    pub fn new(config: &CheckerConfig) -> Result<Self, ClientError> {
        let api_key = config.get_api_key()?;
        let http_client = reqwest::Client
            ::builder()
            .timeout(config.pipeline.request_timeout())
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_endpoint: config.endpoint(),
            api_key,
        })
    }
}

#[async_trait]
impl LanguageModel for ChatCompletionsClient {
    async fn complete(
        &self,
        prompt: &str,
        model_id: &str,
        temperature: f32,
        max_tokens: usize
    ) -> Result<String, ClientError> {
        debug!("API endpoint: {}", self.api_endpoint);
        debug!("Model: {}", model_id);
        debug!("Temperature: {}", temperature);
        debug!("Max tokens: {}", max_tokens);
        debug!("Prompt length: {} characters", prompt.len());

        let request = ChatRequest {
            model: model_id,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature,
            max_tokens,
        };

        let response = self.http_client
            .post(&self.api_endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send().await
            .map_err(|e| {
                let error_msg = format!("Network error when calling model API: {}", e);
                warn!("{}", error_msg);
                if e.is_timeout() {
                    warn!("Request timed out");
                }
                if e.is_connect() {
                    warn!("Connection error - check network connectivity");
                }
                ClientError::Network(error_msg)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(ClientError::Http {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            warn!("Failed to get text from response: {}", e);
            ClientError::Parse(e.to_string())
        })?;

        debug!("Response length: {} characters", response_text.len());

        let parsed: ChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            warn!("Failed to parse model API response: {}", e);
            ClientError::Parse(format!("Invalid chat completion response: {}", e))
        })?;

        let content = parsed.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ClientError::Parse("No choices in model response".to_string()))?;

        info!("Model call completed ({} characters)", content.len());
        Ok(content)
    }
}
