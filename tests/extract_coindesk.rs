// tests/extract_coindesk.rs
// CoinDesk cascade: primary / secondary / tertiary tiers, title-length boundary,
// URL resolution, and the per-source cap.

mod common;

use common::{coindesk_cards, page};
use crypto_news_aggregator::ingest::extract::extract;
use crypto_news_aggregator::ingest::providers::coindesk;

#[test]
fn primary_tier_resolves_relative_links_and_keeps_absolute_ones() {
    let html = coindesk_cards(&[
        ("/markets/btc-breaks-out", "Bitcoin breaks out above $70,000"),
        ("https://www.coindesk.com/policy/mica", "EU MiCA rules take effect this summer"),
    ]);
    let out = extract(&html, &coindesk::config());
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].url, "https://www.coindesk.com/markets/btc-breaks-out");
    assert_eq!(out[0].title, "Bitcoin breaks out above $70,000");
    assert_eq!(out[1].url, "https://www.coindesk.com/policy/mica");
}

#[test]
fn title_length_threshold_is_strict_at_twenty() {
    let nineteen = "Bitcoin rises 5% no";
    let twenty = "Bitcoin rises 5% now";
    assert_eq!(nineteen.chars().count(), 19);
    assert_eq!(twenty.chars().count(), 20);

    let html = coindesk_cards(&[("/a", nineteen), ("/b", twenty)]);
    let out = extract(&html, &coindesk::config());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title, twenty);
    assert_eq!(out[0].url, "https://www.coindesk.com/b");
}

#[test]
fn secondary_tier_used_when_primary_absent() {
    let html = page(
        r#"<a class="articleTextLink" href="/tech/layer2">Layer-2 networks see record activity</a>
           <a class="card-title" href="/markets/eth">Ether options expiry looms for traders</a>"#,
    );
    let out = extract(&html, &coindesk::config());
    let urls: Vec<&str> = out.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://www.coindesk.com/tech/layer2",
            "https://www.coindesk.com/markets/eth"
        ]
    );
}

#[test]
fn tertiary_tier_takes_first_link_inside_card_containers() {
    let html = page(
        r#"<div class="layout">
             <div class="Story-Card">
               <a href="/markets/first">Stablecoin supply hits all-time high</a>
               <a href="/markets/second">This second link is never considered</a>
             </div>
             <article class="feature-article"><a href="/policy/x">Lawmakers debate crypto tax reporting rules</a></article>
           </div>"#,
    );
    let out = extract(&html, &coindesk::config());
    let urls: Vec<&str> = out.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://www.coindesk.com/markets/first",
            "https://www.coindesk.com/policy/x"
        ]
    );
}

#[test]
fn winning_tier_is_final_even_if_all_its_titles_are_short() {
    // Primary selector matches (with a short title), so the long card below is never reached.
    let html = page(
        r#"<a class="card-title-link" href="/x">Too short</a>
           <div class="card"><a href="/y">A perfectly long headline about bitcoin</a></div>"#,
    );
    assert!(extract(&html, &coindesk::config()).is_empty());
}

#[test]
fn no_tier_matching_yields_nothing() {
    let html = page("<p>Maintenance in progress</p>");
    assert!(extract(&html, &coindesk::config()).is_empty());
}

#[test]
fn caps_at_five_even_with_fifty_candidates() {
    let items: Vec<(String, String)> = (0..50)
        .map(|i| (format!("/markets/story-{i}"), format!("Crypto market headline number {i:02}")))
        .collect();
    let refs: Vec<(&str, &str)> = items
        .iter()
        .map(|(h, t)| (h.as_str(), t.as_str()))
        .collect();
    let out = extract(&coindesk_cards(&refs), &coindesk::config());
    assert_eq!(out.len(), 5);
    assert_eq!(out[0].url, "https://www.coindesk.com/markets/story-0");
    assert_eq!(out[4].url, "https://www.coindesk.com/markets/story-4");
}

#[test]
fn two_qualifying_candidates_are_not_padded() {
    let html = coindesk_cards(&[
        ("/a", "Bitcoin hashrate reaches a new record"),
        ("/b", "tiny"),
        ("/c", "Ether staking deposits keep climbing"),
    ]);
    assert_eq!(extract(&html, &coindesk::config()).len(), 2);
}

#[test]
fn repeated_links_are_kept_as_listed() {
    let html = coindesk_cards(&[
        ("/a", "Bitcoin hashrate reaches a new record"),
        ("/a", "Bitcoin hashrate reaches a new record"),
    ]);
    assert_eq!(extract(&html, &coindesk::config()).len(), 2);
}

#[test]
fn protocol_relative_links_never_leave_the_site() {
    let html = coindesk_cards(&[
        ("//evil.example/pwn", "Bitcoin rally draws record retail interest"),
        ("/markets/ok", "Ether funding rates turn positive again"),
    ]);
    let out = extract(&html, &coindesk::config());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].url, "https://www.coindesk.com/markets/ok");
    assert!(out.iter().all(|c| c.url.starts_with(coindesk::BASE_URL)));
}

#[test]
fn fixture_home_page_yields_three_valid_candidates() {
    let html = common::fixture("coindesk_home.html");
    let out = extract(&html, &coindesk::config());
    assert_eq!(out.len(), 3);
    assert_eq!(
        out[0].title,
        "Bitcoin ETF Inflows Hit Record as Institutions Pile In"
    );
    assert!(out.iter().all(|c| c.url.starts_with("https://www.coindesk.com/")));
    assert!(out.iter().all(|c| c.title.chars().count() >= 20));
}
