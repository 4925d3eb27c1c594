//! Crypto News Aggregator: binary entrypoint.
//! Boots the Axum HTTP server, wiring routes, shared state, metrics, and the
//! optional background scrape scheduler.

use std::time::Duration;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crypto_news_aggregator::ingest::scheduler::spawn_scrape_scheduler;
use crypto_news_aggregator::telemetry::Metrics;

/// Install a tracing subscriber. `LOG_FORMAT=json` switches to JSON lines.
/// No-op if the runtime already installed one.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("crypto_news_aggregator=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let res = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let (state, scraper_cfg) = crypto_news_aggregator::build_state()?;

    if let Some(secs) = scraper_cfg.interval_secs {
        tracing::info!(interval_secs = secs, "starting scrape scheduler");
        spawn_scrape_scheduler(
            state.aggregator.clone(),
            state.latest.clone(),
            Duration::from_secs(secs),
        );
    }

    let mut router = crypto_news_aggregator::router(state);
    match Metrics::init(scraper_cfg.max_per_source) {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => tracing::warn!(error = ?e, "metrics disabled"),
    }

    Ok(router.into())
}
