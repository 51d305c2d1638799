use std::sync::Arc;

use async_trait::async_trait;
use log::{ debug, warn };
use scraper::{ Html, Node, Selector };
use serde_json::Value;

use crate::errors::ClientError;
use crate::implementations::config::CheckerConfig;
use crate::implementations::response_parser::parse_structured;
use crate::traits::{ ExtractionOutcome, LanguageModel, PageExtractor };

/// Elements whose text is never article body
const BOILERPLATE: [&str; 12] = [
    "head",
    "nav",
    "header",
    "footer",
    "aside",
    "script",
    "style",
    "noscript",
    "form",
    "iframe",
    "svg",
    "button",
];

const USER_AGENT: &str = concat!("factcheck/", env!("CARGO_PKG_VERSION"));

/// Fetches pages over HTTP without caching and asks a language model to pull
/// the article body out of them, one chunk at a time
#[derive(Clone)]
pub struct LlmPageExtractor {
    http_client: reqwest::Client,
    model: Arc<dyn LanguageModel>,
    model_id: String,
    temperature: f32,
    max_tokens: usize,
    chunk_token_threshold: usize,
    overlap_rate: f32,
}

impl LlmPageExtractor {
    pub fn new(model: Arc<dyn LanguageModel>, config: &CheckerConfig) -> Result<Self, ClientError> {
        let http_client = reqwest::Client
            ::builder()
            .timeout(config.pipeline.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            model,
            model_id: config.extraction_model(),
            temperature: config.extract_temperature.unwrap_or(0.1),
            max_tokens: config.max_tokens(),
            chunk_token_threshold: config.pipeline.chunk_token_threshold,
            overlap_rate: config.pipeline.overlap_rate,
        })
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ClientError> {
        let response = self.http_client
            .get(url)
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
                message: format!("fetching {}", url),
            });
        }

        Ok(response.text().await?)
    }

    async fn extract_chunk(
        &self,
        chunk: &str,
        schema: &Value,
        instruction: &str
    ) -> Result<Vec<Value>, ClientError> {
        let prompt = format!(
            "{}\n\nReturn JSON matching this schema:\n{}\n\nContent:\n{}",
            instruction,
            schema,
            chunk
        );
        let answer = self.model.complete(
            &prompt,
            &self.model_id,
            self.temperature,
            self.max_tokens
        ).await?;

        match parse_structured::<Value>(&answer) {
            Some(Value::Array(items)) => Ok(items),
            Some(value @ Value::Object(_)) => Ok(vec![value]),
            _ => Err(ClientError::Parse("extraction answer carried no JSON object".to_string())),
        }
    }

    /// One model call per chunk, merged into a single JSON array payload.
    /// Fails only when every chunk failed; no chunks at all yields `"[]"`.
    pub async fn extract_chunks(
        &self,
        url: &str,
        chunks: &[String],
        schema: &Value,
        instruction: &str
    ) -> ExtractionOutcome {
        let mut blocks = Vec::new();
        let mut last_error = None;
        for chunk in chunks {
            match self.extract_chunk(chunk, schema, instruction).await {
                Ok(mut items) => blocks.append(&mut items),
                Err(e) => {
                    warn!("Chunk extraction failed for {}: {}", url, e);
                    last_error = Some(e);
                }
            }
        }

        if blocks.is_empty() {
            if let Some(e) = last_error {
                return ExtractionOutcome::failure(e.to_string());
            }
        }

        match serde_json::to_string(&Value::Array(blocks)) {
            Ok(payload) => ExtractionOutcome::success(payload),
            Err(e) => ExtractionOutcome::failure(e.to_string()),
        }
    }
}

#[async_trait]
impl PageExtractor for LlmPageExtractor {
    async fn fetch_and_extract(
        &self,
        url: &str,
        schema: &Value,
        instruction: &str
    ) -> ExtractionOutcome {
        let html = match self.fetch_page(url).await {
            Ok(html) => html,
            Err(e) => {
                return ExtractionOutcome::failure(e.to_string());
            }
        };

        let text = main_text(&html);
        let chunks = chunk_text(&text, self.chunk_token_threshold, self.overlap_rate);
        debug!("{}: {} characters of text in {} chunks", url, text.len(), chunks.len());

        self.extract_chunks(url, &chunks, schema, instruction).await
    }
}

/// Visible text of the page body, preferring an `<article>` or `<main>`
/// element and skipping navigation and other boilerplate
pub fn main_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let focus = Selector::parse("article, main")
        .ok()
        .and_then(|selector| document.select(&selector).next());
    let root = match focus {
        Some(element) => *element,
        None => document.tree.root(),
    };

    let mut parts: Vec<&str> = Vec::new();
    for node in root.descendants() {
        if let Node::Text(text) = node.value() {
            let boilerplate = node
                .ancestors()
                .any(|a| matches!(a.value(), Node::Element(e) if BOILERPLATE.contains(&e.name())));
            let trimmed = text.trim();
            if !boilerplate && !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }
    }

    parts.join(" ")
}

/// Split text into chunks of roughly `threshold` tokens (counted as words),
/// each repeating the last `overlap_rate` share of the previous chunk
pub fn chunk_text(text: &str, threshold: usize, overlap_rate: f32) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let size = threshold.max(1);
    let overlap = ((size as f32) * overlap_rate.clamp(0.0, 0.9)) as usize;
    let step = size.saturating_sub(overlap).max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + size).min(words.len());
        chunks.push(words[start..end].join(" "));
        if end == words.len() {
            break;
        }
        start += step;
    }
    chunks
}
