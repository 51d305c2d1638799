use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ApiConfig {
    /// API key for the language-model service
    pub api_key: Option<String>,

    /// OpenAI-compatible chat completions endpoint
    pub api_endpoint: Option<String>,

    /// Model used for refinement, verification and summaries
    pub model: Option<String>,
}

/// Syndication search feed settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,
    pub hl: String,
    pub gl: String,
    pub ceid: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            endpoint: "https://news.google.com/rss/search".to_string(),
            hl: "en-IN".to_string(),
            gl: "IN".to_string(),
            ceid: "IN:en".to_string(),
        }
    }
}

/// Fan-out, concurrency and chunking limits for a pipeline run
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    pub max_links: usize,
    pub concurrency: usize,
    /// Approximate token budget per extraction chunk
    pub chunk_token_threshold: usize,
    /// Fraction of a chunk repeated at the start of the next one
    pub overlap_rate: f32,
    pub deadline_secs: Option<u64>,
    pub request_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_links: 10,
            concurrency: 4,
            chunk_token_threshold: 1200,
            overlap_rate: 0.1,
            deadline_secs: None,
            request_timeout_secs: 120,
        }
    }
}

impl PipelineConfig {
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CheckerConfig {
    /// Language-model service used by every stage
    #[serde(default)]
    pub llm_api: ApiConfig,

    /// Model used for schema-guided page extraction
    pub extraction_model: Option<String>,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Prompt templates keyed by stage name
    #[serde(default)]
    pub prompt_templates: HashMap<String, String>,

    pub max_tokens: Option<usize>,
    pub refine_temperature: Option<f32>,
    pub verify_temperature: Option<f32>,
    pub extract_temperature: Option<f32>,
    pub summarize_temperature: Option<f32>,
}

impl CheckerConfig {
    /// Load configuration from a YAML file; missing templates fall back to the
    /// built-in ones
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: CheckerConfig = serde_yaml::from_str(&contents)?;
        for (name, template) in default_templates() {
            config.prompt_templates.entry(name).or_insert(template);
        }
        Ok(config)
    }

    /// Get the API key, checking environment variables if not in config
    pub fn get_api_key(&self) -> Result<String, ConfigError> {
        use log::debug;

        if let Some(api_key) = &self.llm_api.api_key {
            debug!("Using API key from config");
            return Ok(api_key.clone());
        }

        for env_var in ["GROQ_API_KEY", "OPENAI_API_KEY"] {
            match std::env::var(env_var) {
                Ok(key) if !key.is_empty() => {
                    debug!("Using API key from {}", env_var);
                    return Ok(key);
                }
                _ => debug!("{} not set", env_var),
            }
        }

        Err(ConfigError::MissingApiKey("set GROQ_API_KEY or llm_api.api_key".to_string()))
    }

    pub fn model(&self) -> String {
        self.llm_api.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn extraction_model(&self) -> String {
        self.extraction_model.clone().unwrap_or_else(|| self.model())
    }

    pub fn endpoint(&self) -> String {
        self.llm_api
            .api_endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens.unwrap_or(4000)
    }

    /// Look up a prompt template by stage name
    pub fn template(&self, template_name: &str) -> Result<String, ConfigError> {
        self.prompt_templates
            .get(template_name)
            .cloned()
            .ok_or_else(|| ConfigError::TemplateNotFound(template_name.to_string()))
    }
}

/// Replace every `{{key}}` placeholder in `template`
pub fn render(template: &str, params: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

fn default_templates() -> HashMap<String, String> {
    let mut prompt_templates = HashMap::new();
    prompt_templates.insert(
        "refine".to_string(),
        r#"
Refine the context: {{claim}}
Give me more information about this context.
Give keywords so I can search on the internet for more information.
Please respond in JSON format like:
{
    "context": "{{claim}}",
    "keywords": ["keyword1", "keyword2"]
}
"#
        .to_string(),
    );
    prompt_templates.insert(
        "extract".to_string(),
        "Extract the main article content as plain text from the HTML. Look for mentions of \
         {{keywords}}. Ignore navigation, advertisements, and boilerplate text. Return a JSON \
         object with a single key 'content'."
            .to_string(),
    );
    prompt_templates.insert(
        "verify".to_string(),
        r#"Based on the refined context: {{context}}

and the following article contents:
{{evidence}}

Does the evidence support the claim? Please respond in JSON format with the following keys:
"supported": (boolean), "confidence": (float between 0 and 1), "explanation": (short explanation)"#
            .to_string(),
    );
    prompt_templates.insert(
        "summarize".to_string(),
        r#"Summarize the following video transcript in a few concise paragraphs.
Keep the main points, names and figures; drop filler and repetition.

Transcript:
{{transcript}}"#
            .to_string(),
    );
    prompt_templates
}

/// Default configuration
impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            llm_api: ApiConfig {
                api_key: None,
                api_endpoint: Some(DEFAULT_ENDPOINT.to_string()),
                model: Some(DEFAULT_MODEL.to_string()),
            },
            extraction_model: Some(DEFAULT_MODEL.to_string()),
            feed: FeedConfig::default(),
            pipeline: PipelineConfig::default(),
            prompt_templates: default_templates(),
            max_tokens: Some(4000),
            refine_temperature: Some(0.3),
            verify_temperature: Some(0.2),
            extract_temperature: Some(0.1),
            summarize_temperature: Some(0.3),
        }
    }
}
