// src/ingest/providers/cointelegraph.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::{RelativeLinks, SourceConfig};
use crate::config::scraper::{MAX_PER_SOURCE_CAP, MIN_TITLE_CHARS_FLOOR};
use crate::ingest::extract::{class_contains_any, sel, Tier};
use crate::ingest::types::Source;

pub const BASE_URL: &str = "https://cointelegraph.com";
pub const LISTING_URL: &str = "https://cointelegraph.com/";

const SCAN_LIMIT: usize = 10;

static POST_CARD: Lazy<Selector> = Lazy::new(|| sel("article.post-card-inline"));
static CONTAINER: Lazy<Selector> = Lazy::new(|| sel("article, div"));
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| sel("a.post-card-inline__title-link"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| sel("a"));
static ANY_LINK: Lazy<Selector> = Lazy::new(|| sel("a[href]"));

/// Headline link inside a post card: the dedicated title link, then any
/// anchor with "title" in its class, then the first link.
fn card_link<'a>(card: ElementRef<'a>) -> Option<ElementRef<'a>> {
    card.select(&TITLE_LINK)
        .next()
        .or_else(|| {
            card.select(&ANCHOR)
                .find(|a| class_contains_any(a, &["title"]))
        })
        .or_else(|| card.select(&ANY_LINK).next())
}

fn inline_post_cards(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&POST_CARD).take(SCAN_LIMIT).collect()
}

fn post_card_containers(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&CONTAINER)
        .filter(|c| class_contains_any(c, &["post-card", "article"]))
        .take(SCAN_LIMIT)
        .collect()
}

pub fn config() -> SourceConfig {
    SourceConfig {
        source: Source::CoinTelegraph,
        base_url: BASE_URL.to_string(),
        listing_url: LISTING_URL.to_string(),
        cascade: vec![
            Tier::containers(inline_post_cards, card_link),
            Tier::containers(post_card_containers, card_link),
        ],
        keywords: None,
        relative_links: RelativeLinks::ResolveAgainstBase,
        max_records: MAX_PER_SOURCE_CAP,
        min_title_chars: MIN_TITLE_CHARS_FLOOR,
        max_text_chars: 5000,
    }
}
