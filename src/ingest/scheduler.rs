// src/ingest/scheduler.rs
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::{counter, gauge};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::ingest::types::ArticleRecord;
use crate::ingest::Aggregator;

/// Result of one completed background scrape.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeSnapshot {
    /// 1-based run number since process start.
    pub run: u64,
    pub finished_at: DateTime<Utc>,
    pub count: usize,
    pub articles: Vec<ArticleRecord>,
}

/// Shared slot holding the most recent scheduled scrape. Cheap to clone.
#[derive(Clone, Default)]
pub struct LatestScrape {
    inner: Arc<RwLock<Option<ScrapeSnapshot>>>,
}

impl LatestScrape {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<ScrapeSnapshot> {
        self.inner.read().await.clone()
    }

    /// Replace the stored run with `articles`; returns the new run number.
    pub async fn record(&self, articles: Vec<ArticleRecord>) -> u64 {
        let mut slot = self.inner.write().await;
        let run = slot.as_ref().map_or(1, |s| s.run + 1);
        *slot = Some(ScrapeSnapshot {
            run,
            finished_at: Utc::now(),
            count: articles.len(),
            articles,
        });
        run
    }
}

/// Spawn a background task that re-runs `scrape_all()` every `interval` and
/// publishes each result into `latest`. The first run starts immediately.
/// A failed run is simply retried on the next tick.
pub fn spawn_scrape_scheduler(
    aggregator: Arc<Aggregator>,
    latest: LatestScrape,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let records = aggregator.scrape_all().await;
            let count = records.len();
            let run = latest.record(records).await;
            let now = Utc::now().timestamp().max(0) as u64;

            counter!("scrape_runs_total").increment(1);
            gauge!("scrape_last_run_ts").set(now as f64);

            tracing::info!(target: "ingest", run, count, "scheduled scrape tick");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn record_numbers_runs_and_replaces_previous() {
        let latest = LatestScrape::new();
        assert!(latest.get().await.is_none());

        assert_eq!(latest.record(Vec::new()).await, 1);
        assert_eq!(latest.record(Vec::new()).await, 2);

        let snap = latest.get().await.expect("snapshot");
        assert_eq!(snap.run, 2);
        assert_eq!(snap.count, 0);
    }
}
