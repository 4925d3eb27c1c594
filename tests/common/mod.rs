// tests/common/mod.rs
// Shared HTML builders and fixture wiring for integration tests.
#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use crypto_news_aggregator::config::scraper::ScraperConfig;
use crypto_news_aggregator::ingest::fetch::StaticFetcher;
use crypto_news_aggregator::ingest::providers::{coindesk, cointelegraph, yahoo};
use crypto_news_aggregator::ingest::Aggregator;

pub fn fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{name}"))
        .unwrap_or_else(|_| panic!("missing tests/fixtures/{name}"))
}

pub fn page(body: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>t</title></head><body>{body}</body></html>")
}

/// CoinDesk-style listing using the primary `a.card-title-link` markup.
pub fn coindesk_cards(items: &[(&str, &str)]) -> String {
    let cards: String = items
        .iter()
        .map(|(href, title)| {
            format!(r#"<div class="card"><a class="card-title-link" href="{href}">{title}</a></div>"#)
        })
        .collect();
    page(&cards)
}

/// Yahoo-style listing: `li > h3 > a`.
pub fn yahoo_items(items: &[(&str, &str)]) -> String {
    let lis: String = items
        .iter()
        .map(|(href, title)| format!(r#"<li><h3><a href="{href}">{title}</a></h3></li>"#))
        .collect();
    page(&format!("<ul>{lis}</ul>"))
}

pub fn article_page(text: &str) -> String {
    page(&format!("<article><p>{text}</p></article>"))
}

pub const ETF_BODY: &str = "Bitcoin ETF Inflows Hit Record Spot bitcoin ETFs took in $1.2 billion on Tuesday. Analysts expect the trend to continue.";

/// Fetcher serving the three home-page fixtures plus article bodies for most links.
/// `https://www.coindesk.com/policy/2024/05/01/sec-delays-decision` has no page on purpose.
pub fn fixture_fetcher() -> StaticFetcher {
    let article = fixture("article.html");
    StaticFetcher::new()
        .with_page(coindesk::LISTING_URL, fixture("coindesk_home.html"))
        .with_page(cointelegraph::LISTING_URL, fixture("cointelegraph_home.html"))
        .with_page(yahoo::LISTING_URL, fixture("yahoo_crypto.html"))
        .with_page(
            "https://www.coindesk.com/markets/2024/05/01/bitcoin-etf-inflows-hit-record",
            article.clone(),
        )
        .with_page(
            "https://www.coindesk.com/business/2024/05/01/miners-expand",
            article.clone(),
        )
        .with_page(
            "https://cointelegraph.com/news/solana-defi-tvl-climbs",
            article.clone(),
        )
        .with_page(
            "https://cointelegraph.com/news/ethereum-gas-fees-drop",
            article.clone(),
        )
        .with_page(
            "https://finance.yahoo.com/news/bitcoin-price-today-123.html",
            article.clone(),
        )
        .with_page(
            "https://finance.yahoo.com/news/stablecoin-bill-789.html",
            article,
        )
}

pub fn aggregator_with(fetcher: StaticFetcher) -> Aggregator {
    Aggregator::new(Arc::new(fetcher), &ScraperConfig::default())
}
