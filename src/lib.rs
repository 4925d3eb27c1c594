// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod ingest;
pub mod telemetry;
pub mod pipeline;
pub mod sentiment;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::ingest::types::{ArticleRecord, Source, TEXT_UNAVAILABLE};
pub use crate::ingest::Aggregator;

use crate::analyze::SentimentService;
use crate::config::scraper::ScraperConfig;
use crate::config::sentiment::SentimentConfig;

/// Build the application state from on-disk config and environment.
/// Returns the scraper config alongside so callers can wire the scheduler.
pub fn build_state() -> anyhow::Result<(AppState, ScraperConfig)> {
    let scraper_cfg = ScraperConfig::load_default()?.with_env_overrides();
    let sentiment_cfg = SentimentConfig::from_env();
    tracing::info!(
        timeout_secs = scraper_cfg.timeout_secs,
        max_per_source = scraper_cfg.max_per_source,
        llm = ?sentiment_cfg.mode,
        model = %sentiment_cfg.model,
        "config loaded"
    );
    let state = AppState::new(
        Aggregator::from_config(&scraper_cfg)?,
        SentimentService::from_config(&sentiment_cfg),
    );
    Ok((state, scraper_cfg))
}
