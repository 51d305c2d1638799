use serde::{ Deserialize, Serialize };
use std::fmt;

/// A candidate evidence source returned by discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleLink {
    pub url: String,
    pub title: String,
    pub domain: String,
}

impl ArticleLink {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        let url = url.into();
        let domain = domain_of(&url);
        ArticleLink {
            url,
            title: title.into(),
            domain,
        }
    }
}

/// Authority part of a URL (`https://host/path` -> `host`); empty without a scheme
pub fn domain_of(url: &str) -> String {
    match url.split_once("://") {
        Some((_, rest)) => rest.split('/').next().unwrap_or("").to_string(),
        None => String::new(),
    }
}

/// Outcome of fetching and extracting one link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentStatus {
    /// Fetched and extracted usable text
    Ok,
    /// Fetched, but the extraction carried no usable content
    Empty,
    /// Could not be fetched or extracted
    Failed,
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentStatus::Ok => write!(f, "Ok"),
            ContentStatus::Empty => write!(f, "Empty"),
            ContentStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Extracted text for one link. Failed and empty entries are kept for coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub url: String,
    pub text: String,
    pub status: ContentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArticleContent {
    pub fn ok(url: impl Into<String>, text: impl Into<String>) -> Self {
        ArticleContent {
            url: url.into(),
            text: text.into(),
            status: ContentStatus::Ok,
            error: None,
        }
    }

    pub fn empty(url: impl Into<String>) -> Self {
        ArticleContent {
            url: url.into(),
            text: String::new(),
            status: ContentStatus::Empty,
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        ArticleContent {
            url: url.into(),
            text: String::new(),
            status: ContentStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.status == ContentStatus::Ok
    }
}
