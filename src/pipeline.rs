// src/pipeline.rs
//! Orchestrator: scrape everything, apply the fallback-headline policy, then
//! hand the records to the sentiment service.

use serde::Serialize;

use crate::analyze::{ArticleInput, SentimentReport, SentimentService};
use crate::ingest::fallback::with_fallback;
use crate::ingest::types::ArticleRecord;
use crate::ingest::Aggregator;

#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub count: usize,
    /// True when no source produced anything and the static headlines were used.
    pub fallback_used: bool,
    pub articles: Vec<ArticleRecord>,
    pub sentiment: SentimentReport,
}

/// Scrape all sources; never returns an empty list.
pub async fn collect_articles(aggregator: &Aggregator) -> (Vec<ArticleRecord>, bool) {
    with_fallback(aggregator.scrape_all().await)
}

pub async fn run(aggregator: &Aggregator, sentiment: &SentimentService) -> PipelineRun {
    let (articles, fallback_used) = collect_articles(aggregator).await;
    let inputs: Vec<ArticleInput> = articles.iter().map(ArticleInput::from).collect();
    let report = sentiment.analyze_articles(&inputs).await;
    tracing::info!(
        count = articles.len(),
        fallback_used,
        overall = ?report.overall_sentiment,
        "pipeline run finished"
    );
    PipelineRun {
        count: articles.len(),
        fallback_used,
        articles,
        sentiment: report,
    }
}
