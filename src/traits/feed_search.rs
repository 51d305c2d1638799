use async_trait::async_trait;

use crate::errors::ClientError;

/// One item of a syndication search feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedEntry {
    pub link: Option<String>,
    pub title: String,
}

/// Syndication search, returning entries in the feed's own ranking order
#[async_trait]
pub trait FeedSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<FeedEntry>, ClientError>;
}
