use std::sync::Arc;

use futures::stream::{ self, StreamExt };
use log::{ debug, info, warn };
use serde_json::{ json, Value };
use tokio::time::Instant;

use crate::errors::FactCheckResult;
use crate::implementations::config::{ render, CheckerConfig };
use crate::models::{ ArticleContent, ArticleLink, ContentStatus };
use crate::traits::PageExtractor;

const DEADLINE_EXCEEDED: &str = "deadline exceeded";

/// Schema every extraction is asked to satisfy
pub fn content_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "content": { "type": "string" }
        }
    })
}

/// Fetches candidate links and extracts their main text, one independent
/// unit of work per link
#[derive(Clone)]
pub struct ContentExtractor {
    extractor: Arc<dyn PageExtractor>,
    concurrency: usize,
    instruction_template: String,
}

impl ContentExtractor {
    pub fn new(extractor: Arc<dyn PageExtractor>, config: &CheckerConfig) -> FactCheckResult<Self> {
        Ok(Self {
            extractor,
            concurrency: config.pipeline.concurrency.max(1),
            instruction_template: config.template("extract")?,
        })
    }

    pub async fn extract(&self, links: &[ArticleLink], keywords: &[String]) -> Vec<ArticleContent> {
        self.extract_until(links, keywords, None).await
    }

    /// One entry per link, in input order. Links still in flight at
    /// `deadline` are abandoned and marked failed.
    pub async fn extract_until(
        &self,
        links: &[ArticleLink],
        keywords: &[String],
        deadline: Option<Instant>
    ) -> Vec<ArticleContent> {
        if links.is_empty() {
            return Vec::new();
        }

        info!("Extracting content from {} links ({} at a time)", links.len(), self.concurrency);
        let schema = content_schema();
        let keyword_list = format!("{:?}", keywords);
        let instruction = render(&self.instruction_template, &[("keywords", keyword_list.as_str())]);
        let schema = &schema;
        let instruction = instruction.as_str();

        let mut results: Vec<(usize, ArticleContent)> = stream
            ::iter(
                links
                    .iter()
                    .cloned()
                    .enumerate()
                    .map(|(index, link)| async move {
                        let link = &link;
                        let content = match deadline {
                            Some(deadline) => {
                                if Instant::now() >= deadline {
                                    ArticleContent::failed(&link.url, DEADLINE_EXCEEDED)
                                } else {
                                    match
                                        tokio::time::timeout_at(
                                            deadline,
                                            self.extract_one(link, schema, instruction)
                                        ).await
                                    {
                                        Ok(content) => content,
                                        Err(_) => {
                                            warn!("Abandoned {} at deadline", link.url);
                                            ArticleContent::failed(&link.url, DEADLINE_EXCEEDED)
                                        }
                                    }
                                }
                            }
                            None => self.extract_one(link, schema, instruction).await,
                        };
                        (index, content)
                    })
            )
            .buffer_unordered(self.concurrency)
            .collect().await;

        results.sort_by_key(|(index, _)| *index);
        let contents: Vec<ArticleContent> = results
            .into_iter()
            .map(|(_, content)| content)
            .collect();

        let ok = contents
            .iter()
            .filter(|c| c.status == ContentStatus::Ok)
            .count();
        info!("Extraction finished: {}/{} usable", ok, contents.len());
        contents
    }

    async fn extract_one(
        &self,
        link: &ArticleLink,
        schema: &Value,
        instruction: &str
    ) -> ArticleContent {
        if link.url.trim().is_empty() {
            warn!("Skipping link with empty URL ({:?})", link.title);
            return ArticleContent::failed("", "empty URL");
        }

        let outcome = self.extractor.fetch_and_extract(&link.url, schema, instruction).await;
        if !outcome.success {
            warn!("Content crawl failed for {}: {}", link.url, outcome.error);
            return ArticleContent::failed(&link.url, outcome.error);
        }

        match interpret_payload(&outcome.extracted_payload) {
            Ok(Some(text)) => {
                debug!("Extracted {} characters from {}", text.len(), link.url);
                ArticleContent::ok(&link.url, text)
            }
            Ok(None) => {
                debug!("No usable content extracted from {}", link.url);
                ArticleContent::empty(&link.url)
            }
            Err(e) => {
                warn!("Failed to parse extracted content for {}: {}", link.url, e);
                ArticleContent::failed(&link.url, e)
            }
        }
    }
}

/// Pull the `content` text out of an extraction payload.
///
/// Accepts a single `{content}` object or an array of them (one per chunk).
/// `Ok(None)` means the payload was valid but carried no text; `Err` means
/// it was not JSON at all.
pub fn interpret_payload(payload: &str) -> Result<Option<String>, String> {
    let data: Value = serde_json
        ::from_str(payload)
        .map_err(|e| format!("malformed extraction payload: {}", e))?;

    let pieces: Vec<String> = match &data {
        Value::Object(_) => content_field(&data).into_iter().collect(),
        Value::Array(items) => items.iter().filter_map(content_field).collect(),
        _ => Vec::new(),
    };

    if pieces.is_empty() {
        Ok(None)
    } else {
        Ok(Some(pieces.join("\n")))
    }
}

fn content_field(value: &Value) -> Option<String> {
    value
        .get("content")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
