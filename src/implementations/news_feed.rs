use async_trait::async_trait;
use log::{ debug, warn };
use serde::Deserialize;

use crate::errors::ClientError;
use crate::implementations::config::{ CheckerConfig, FeedConfig };
use crate::traits::{ FeedEntry, FeedSearch };

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

/// Google News RSS search
#[derive(Clone)]
pub struct NewsFeedSearch {
    http_client: reqwest::Client,
    feed: FeedConfig,
}

impl NewsFeedSearch {
    pub fn new(config: &CheckerConfig) -> Result<Self, ClientError> {
        let http_client = reqwest::Client
            ::builder()
            .timeout(config.pipeline.request_timeout())
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            feed: config.feed.clone(),
        })
    }

    /// `query` is expected to be percent-encoded already
    pub fn feed_url(&self, query: &str) -> String {
        format!(
            "{}?q={}&hl={}&gl={}&ceid={}",
            self.feed.endpoint,
            query,
            self.feed.hl,
            self.feed.gl,
            self.feed.ceid
        )
    }
}

/// Parse an RSS 2.0 document into entries, preserving document order
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, ClientError> {
    let rss: Rss = quick_xml::de
        ::from_str(xml)
        .map_err(|e| ClientError::Parse(format!("Invalid RSS document: {}", e)))?;

    Ok(
        rss.channel.items
            .into_iter()
            .map(|item| FeedEntry {
                link: item.link,
                title: item.title.unwrap_or_default(),
            })
            .collect()
    )
}

#[async_trait]
impl FeedSearch for NewsFeedSearch {
    async fn search(&self, query: &str) -> Result<Vec<FeedEntry>, ClientError> {
        let url = self.feed_url(query);
        debug!("Fetching feed {}", url);

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Feed returned HTTP {}", status);
            return Err(ClientError::Http {
                status,
                message: format!("feed request to {} failed", self.feed.endpoint),
            });
        }

        let body = response.text().await?;
        let entries = parse_feed(&body)?;
        debug!("Feed returned {} entries", entries.len());
        Ok(entries)
    }
}
