// src/ingest/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::fetch::FetchFailure;

/// Placeholder stored in `ArticleRecord::text` when no body could be extracted.
pub const TEXT_UNAVAILABLE: &str = "Article text not available";

/// News site an article came from. `Fallback` marks orchestrator-authored
/// headlines that were never scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    CoinDesk,
    CoinTelegraph,
    #[serde(rename = "Yahoo Finance")]
    YahooFinance,
    Fallback,
}

impl Source {
    /// Scraped sources, in aggregation order.
    pub const SCRAPED: [Source; 3] = [Source::CoinDesk, Source::CoinTelegraph, Source::YahooFinance];

    pub fn display_name(self) -> &'static str {
        match self {
            Source::CoinDesk => "CoinDesk",
            Source::CoinTelegraph => "CoinTelegraph",
            Source::YahooFinance => "Yahoo Finance",
            Source::Fallback => "Fallback",
        }
    }

    /// Path segment used by the single-source endpoints (`/scrape/{slug}`).
    pub fn slug(self) -> &'static str {
        match self {
            Source::CoinDesk => "coindesk",
            Source::CoinTelegraph => "cointelegraph",
            Source::YahooFinance => "yahoo",
            Source::Fallback => "fallback",
        }
    }

    /// Exact, case-insensitive slug lookup over the scraped sources.
    pub fn from_slug(slug: &str) -> Option<Source> {
        Source::SCRAPED
            .into_iter()
            .find(|s| s.slug().eq_ignore_ascii_case(slug))
    }

    /// Map a free-form source name ("coindesk.com", "Yahoo Finance Crypto", ...)
    /// onto a scraped source.
    pub fn from_name(name: &str) -> Option<Source> {
        let n = name.to_ascii_lowercase();
        if n.contains("coindesk") {
            Some(Source::CoinDesk)
        } else if n.contains("cointelegraph") {
            Some(Source::CoinTelegraph)
        } else if n.contains("yahoo") {
            Some(Source::YahooFinance)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Title/URL pair pulled from a listing page. The URL is already absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub url: String,
}

/// A finalized scraped article, as handed to downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleRecord {
    pub source: Source,
    pub title: String,
    pub url: String,
    pub text: String,
    pub scraped_at: DateTime<Utc>,
}

impl ArticleRecord {
    pub fn has_body(&self) -> bool {
        self.text != TEXT_UNAVAILABLE
    }
}

/// Page retrieval seam. Production uses [`crate::ingest::fetch::HttpFetcher`];
/// tests plug in [`crate::ingest::fetch::StaticFetcher`].
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure>;
}
