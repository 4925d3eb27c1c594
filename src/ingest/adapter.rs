// src/ingest/adapter.rs
use anyhow::{Context, Result};
use chrono::Utc;
use metrics::{counter, histogram};

use crate::ingest::body::fetch_body;
use crate::ingest::extract::extract;
use crate::ingest::providers::SourceConfig;
use crate::ingest::types::{ArticleRecord, Fetcher};

/// Scrape one source: listing page -> candidates -> bodies -> records.
///
/// Best-effort: if the source cannot be scraped at all the result is empty and
/// the failure is logged, never returned.
pub async fn scrape_source(fetcher: &dyn Fetcher, src: &SourceConfig) -> Vec<ArticleRecord> {
    let t0 = std::time::Instant::now();
    tracing::info!(target: "ingest", source = %src.source, url = %src.listing_url, "scraping source");

    let out = match try_scrape_source(fetcher, src).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(target: "ingest", source = %src.source, error = ?e, "source unavailable");
            counter!("scrape_source_errors_total", "source" => src.source.slug()).increment(1);
            Vec::new()
        }
    };

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("scrape_source_ms", "source" => src.source.slug()).record(ms);
    counter!("scrape_records_total", "source" => src.source.slug()).increment(out.len() as u64);
    tracing::info!(
        target: "ingest",
        source = %src.source,
        count = out.len(),
        elapsed_ms = ms as u64,
        "scraped source"
    );
    out
}

async fn try_scrape_source(fetcher: &dyn Fetcher, src: &SourceConfig) -> Result<Vec<ArticleRecord>> {
    let listing = fetcher
        .fetch(&src.listing_url)
        .await
        .with_context(|| format!("fetching {} listing {}", src.source, src.listing_url))?;

    // Html is not Send; keep parsing out of any await. `extract` enforces the
    // per-source cap.
    let candidates = extract(&listing, src);
    counter!("scrape_candidates_total", "source" => src.source.slug())
        .increment(candidates.len() as u64);

    let mut out = Vec::with_capacity(candidates.len());
    for c in candidates {
        let text = fetch_body(fetcher, &c.url, src.max_text_chars).await;
        out.push(ArticleRecord {
            source: src.source,
            title: c.title,
            url: c.url,
            text,
            scraped_at: Utc::now(),
        });
    }
    Ok(out)
}
