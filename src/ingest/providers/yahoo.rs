// src/ingest/providers/yahoo.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::{RelativeLinks, SourceConfig};
use crate::config::scraper::{MAX_PER_SOURCE_CAP, MIN_TITLE_CHARS_FLOOR};
use crate::ingest::extract::{sel, Tier};
use crate::ingest::types::Source;

pub const BASE_URL: &str = "https://finance.yahoo.com";
pub const LISTING_URL: &str = "https://finance.yahoo.com/topic/crypto/?guccounter=1";

const SCAN_LIMIT: usize = 20;

/// The crypto topic page mixes in general market stories; a candidate must hit
/// one of these in its title or link.
pub const CRYPTO_KEYWORDS: &[&str] = &[
    "crypto",
    "bitcoin",
    "btc",
    "ethereum",
    "eth",
    "blockchain",
    "defi",
    "nft",
    "coin",
    "token",
    "solana",
    "cardano",
    "polygon",
    "dogecoin",
    "shiba",
    "altcoin",
    "web3",
    "digital currency",
    "cryptocurrency",
    "stablecoin",
    "mining",
    "wallet",
    "exchange",
];

static CONTAINER: Lazy<Selector> = Lazy::new(|| sel("li, article"));
static HEADING: Lazy<Selector> = Lazy::new(|| sel("h3, h2"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| sel("a"));

fn stream_items(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&CONTAINER).take(SCAN_LIMIT).collect()
}

/// First anchor under the item's first `h3`/`h2`.
fn heading_link<'a>(item: ElementRef<'a>) -> Option<ElementRef<'a>> {
    item.select(&HEADING).next()?.select(&ANCHOR).next()
}

pub fn config() -> SourceConfig {
    SourceConfig {
        source: Source::YahooFinance,
        base_url: BASE_URL.to_string(),
        listing_url: LISTING_URL.to_string(),
        cascade: vec![Tier::containers(stream_items, heading_link)],
        keywords: Some(CRYPTO_KEYWORDS),
        relative_links: RelativeLinks::RootRelativeOnly,
        max_records: MAX_PER_SOURCE_CAP,
        min_title_chars: MIN_TITLE_CHARS_FLOOR,
        max_text_chars: 5000,
    }
}
