// tests/scheduler.rs
// Background scrape loop on a paused tokio clock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{aggregator_with, fixture_fetcher};
use crypto_news_aggregator::ingest::scheduler::{spawn_scrape_scheduler, LatestScrape};

#[tokio::test(start_paused = true)]
async fn publishes_first_run_immediately_then_every_interval() {
    let latest = LatestScrape::new();
    let handle = spawn_scrape_scheduler(
        Arc::new(aggregator_with(fixture_fetcher())),
        latest.clone(),
        Duration::from_secs(600),
    );

    tokio::time::sleep(Duration::from_secs(1)).await;
    let first = latest.get().await.expect("first run stored");
    assert_eq!(first.run, 1);
    assert_eq!(first.count, 7);
    assert_eq!(first.articles.len(), 7);

    // Not yet due.
    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(latest.get().await.expect("snapshot").run, 1);

    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(latest.get().await.expect("snapshot").run, 2);

    handle.abort();
}
