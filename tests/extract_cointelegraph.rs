// tests/extract_cointelegraph.rs

mod common;

use common::page;
use crypto_news_aggregator::ingest::extract::extract;
use crypto_news_aggregator::ingest::providers::cointelegraph;

#[test]
fn fixture_uses_dedicated_title_links() {
    let out = extract(
        &common::fixture("cointelegraph_home.html"),
        &cointelegraph::config(),
    );
    let got: Vec<(&str, &str)> = out
        .iter()
        .map(|c| (c.title.as_str(), c.url.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (
                "Solana DeFi TVL climbs to a two-year high",
                "https://cointelegraph.com/news/solana-defi-tvl-climbs"
            ),
            (
                "Ethereum gas fees drop to multi-year lows",
                "https://cointelegraph.com/news/ethereum-gas-fees-drop"
            ),
        ]
    );
}

#[test]
fn card_link_falls_back_to_title_class_then_first_link() {
    let html = page(
        r#"<article class="post-card-inline">
             <a class="thumb" href="/news/thumb">Thumbnail link text that is long</a>
             <a class="Card__Title" href="/news/by-title-class">Bitcoin miners sell reserves after halving</a>
           </article>
           <article class="post-card-inline">
             <a href="/news/first-link">Polygon announces upgrade to its network</a>
           </article>"#,
    );
    let out = extract(&html, &cointelegraph::config());
    let urls: Vec<&str> = out.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://cointelegraph.com/news/by-title-class",
            "https://cointelegraph.com/news/first-link"
        ]
    );
}

#[test]
fn secondary_tier_matches_post_card_class_substring() {
    let html = page(
        r#"<div class="PostCard-wrapper"><a href="/ignored">Should not be picked up at all</a></div>
           <div class="main-post-card"><a href="/news/xrp">XRP lawsuit ends with settlement</a></div>"#,
    );
    let out = extract(&html, &cointelegraph::config());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].url, "https://cointelegraph.com/news/xrp");
}

#[test]
fn inline_cards_without_links_still_win_the_cascade() {
    // Post cards exist but carry no anchors; the looser container tier must not run.
    let html = page(
        r#"<article class="post-card-inline"><span>Sponsored placeholder card</span></article>
           <div class="post-card"><a href="/news/btc">Bitcoin dominance rises above 55 percent</a></div>"#,
    );
    assert!(extract(&html, &cointelegraph::config()).is_empty());
}
