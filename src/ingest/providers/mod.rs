// src/ingest/providers/mod.rs
//! Per-source scraping configuration. Each provider module contributes a
//! [`SourceConfig`]; the scraping algorithm itself is shared (see `ingest::adapter`).

pub mod coindesk;
pub mod cointelegraph;
pub mod yahoo;

use crate::config::scraper::{ScraperConfig, MAX_PER_SOURCE_CAP, MIN_TITLE_CHARS_FLOOR};
use crate::ingest::extract::Tier;
use crate::ingest::types::Source;

/// How links that do not start with `http` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeLinks {
    /// Resolve against the source's base URL.
    ResolveAgainstBase,
    /// Resolve only `/`-rooted links; discard anything else.
    RootRelativeOnly,
}

/// Everything the shared adapter needs to scrape one site.
#[derive(Clone)]
pub struct SourceConfig {
    pub source: Source,
    /// Scheme + host used to resolve relative links.
    pub base_url: String,
    /// Page holding the headline list.
    pub listing_url: String,
    /// Selector tiers, most specific first.
    pub cascade: Vec<Tier>,
    /// Required keywords (title or link); `None` = no filter.
    pub keywords: Option<&'static [&'static str]>,
    pub relative_links: RelativeLinks,
    pub max_records: usize,
    pub min_title_chars: usize,
    /// Cap on extracted body text, in chars.
    pub max_text_chars: usize,
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("source", &self.source)
            .field("listing_url", &self.listing_url)
            .field("tiers", &self.cascade.len())
            .field("keywords", &self.keywords.map(|k| k.len()))
            .field("relative_links", &self.relative_links)
            .field("max_records", &self.max_records)
            .finish()
    }
}

/// Source configs in aggregation order, with config overrides applied.
pub fn all(cfg: &ScraperConfig) -> Vec<SourceConfig> {
    Source::SCRAPED
        .iter()
        .filter_map(|s| for_source(*s, cfg))
        .collect()
}

pub fn for_source(source: Source, cfg: &ScraperConfig) -> Option<SourceConfig> {
    let mut sc = match source {
        Source::CoinDesk => coindesk::config(),
        Source::CoinTelegraph => cointelegraph::config(),
        Source::YahooFinance => yahoo::config(),
        Source::Fallback => return None,
    };
    if let Some(u) = cfg.listing_url_override(source.slug()) {
        sc.listing_url = u.to_string();
    }
    // ScraperConfig fields are public; re-apply the hard bounds here.
    sc.max_records = cfg.max_per_source.clamp(1, MAX_PER_SOURCE_CAP);
    sc.min_title_chars = cfg.min_title_chars.max(MIN_TITLE_CHARS_FLOOR);
    sc.max_text_chars = cfg.max_text_chars;
    Some(sc)
}
