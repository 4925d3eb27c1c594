// src/ingest/providers/coindesk.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::{RelativeLinks, SourceConfig};
use crate::config::scraper::{MAX_PER_SOURCE_CAP, MIN_TITLE_CHARS_FLOOR};
use crate::ingest::extract::{class_contains_any, sel, Tier};
use crate::ingest::types::Source;

pub const BASE_URL: &str = "https://www.coindesk.com";
pub const LISTING_URL: &str = "https://www.coindesk.com/";

const SCAN_LIMIT: usize = 10;

static TITLE_LINK: Lazy<Selector> = Lazy::new(|| sel("a.card-title-link"));
static ALT_TITLE_LINK: Lazy<Selector> = Lazy::new(|| sel("a.card-title, a.articleTextLink"));
static CONTAINER: Lazy<Selector> = Lazy::new(|| sel("article, div"));
static ANY_LINK: Lazy<Selector> = Lazy::new(|| sel("a[href]"));

fn title_links(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&TITLE_LINK).take(SCAN_LIMIT).collect()
}

fn alt_title_links(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&ALT_TITLE_LINK).take(SCAN_LIMIT).collect()
}

fn card_containers(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&CONTAINER)
        .filter(|c| class_contains_any(c, &["card", "article"]))
        .take(SCAN_LIMIT)
        .collect()
}

fn first_link<'a>(container: ElementRef<'a>) -> Option<ElementRef<'a>> {
    container.select(&ANY_LINK).next()
}

pub fn config() -> SourceConfig {
    SourceConfig {
        source: Source::CoinDesk,
        base_url: BASE_URL.to_string(),
        listing_url: LISTING_URL.to_string(),
        cascade: vec![
            Tier::anchors(title_links),
            Tier::anchors(alt_title_links),
            Tier::containers(card_containers, first_link),
        ],
        keywords: None,
        relative_links: RelativeLinks::ResolveAgainstBase,
        max_records: MAX_PER_SOURCE_CAP,
        min_title_chars: MIN_TITLE_CHARS_FLOOR,
        max_text_chars: 5000,
    }
}
