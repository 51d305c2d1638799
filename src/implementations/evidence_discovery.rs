use std::sync::Arc;

use log::{ debug, info, warn };

use crate::models::ArticleLink;
use crate::traits::FeedSearch;

/// Upper bound on candidate sources per claim
pub const MAX_CANDIDATE_LINKS: usize = 10;

/// Turns keywords into a list of candidate source links
#[derive(Clone)]
pub struct EvidenceDiscovery {
    search: Arc<dyn FeedSearch>,
    max_links: usize,
}

impl EvidenceDiscovery {
    pub fn new(search: Arc<dyn FeedSearch>, max_links: usize) -> Self {
        Self { search, max_links: max_links.min(MAX_CANDIDATE_LINKS) }
    }

    /// Links in the feed's own ranking order, at most `max_links` of them.
    /// No keywords, a failed search, or an empty feed all yield an empty list.
    pub async fn discover(&self, keywords: &[String]) -> Vec<ArticleLink> {
        let query = build_query(keywords);
        if query.is_empty() {
            info!("No keywords to search for; no candidate sources");
            return Vec::new();
        }

        debug!("Feed query: {}", query);
        let entries = match self.search.search(&query).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Feed search failed, continuing without sources: {}", e);
                return Vec::new();
            }
        };

        let links: Vec<ArticleLink> = entries
            .into_iter()
            .take(self.max_links)
            .filter_map(|entry| {
                let link = entry.link.filter(|l| !l.trim().is_empty())?;
                Some(ArticleLink::new(link.trim(), entry.title))
            })
            .collect();

        info!("Discovered {} candidate sources", links.len());
        links
    }
}

/// Lower-case and percent-encode each keyword, joined with `+`
pub fn build_query(keywords: &[String]) -> String {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .map(|k| urlencoding::encode(&k).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}
