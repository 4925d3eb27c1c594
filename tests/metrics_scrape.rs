// tests/metrics_scrape.rs
#![cfg(feature = "strict-metrics")]

mod common;

use common::{aggregator_with, fixture_fetcher};
use crypto_news_aggregator::ingest::fallback::with_fallback;
use crypto_news_aggregator::ingest::providers::coindesk;
use crypto_news_aggregator::telemetry::Metrics;

#[tokio::test]
async fn scrape_series_exposed_after_run() {
    // Installs the global recorder; keep to one test per process.
    let metrics = Metrics::init(5).expect("recorder");

    let agg = aggregator_with(fixture_fetcher().with_status(coindesk::LISTING_URL, 503));
    let out = agg.scrape_all().await;
    assert_eq!(out.len(), 4);
    let _ = with_fallback(Vec::new());

    let text = metrics.handle.render();
    for series in [
        "scrape_max_per_source",
        "scrape_candidates_total",
        "scrape_records_total",
        "scrape_source_errors_total",
        "scrape_source_ms",
        "scrape_fallback_used_total",
    ] {
        assert!(text.contains(series), "missing {series} in:\n{text}");
    }
    assert!(text.contains(r#"source="coindesk""#));
}
