// src/ingest/fetch.rs
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use thiserror::Error;

use crate::config::scraper::ScraperConfig;
use crate::ingest::types::Fetcher;

/// Why a page could not be retrieved. Callers treat every variant as "no content".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {0}")]
    Status(u16),
    #[error("failed to read body: {0}")]
    Body(String),
}

/// reqwest-backed fetcher with a fixed User-Agent and request timeout. No retries.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(cfg: &ScraperConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("building scraper http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        let resp = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(target: "ingest", %url, error = %e, "fetch failed");
                counter!("scrape_fetch_failures_total").increment(1);
                return Err(FetchFailure::Network(e.to_string()));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(target: "ingest", %url, status = status.as_u16(), "non-2xx response");
            counter!("scrape_fetch_failures_total").increment(1);
            return Err(FetchFailure::Status(status.as_u16()));
        }

        resp.text().await.map_err(|e| {
            counter!("scrape_fetch_failures_total").increment(1);
            FetchFailure::Body(e.to_string())
        })
    }
}

/// Canned response served by [`StaticFetcher`].
#[derive(Debug, Clone)]
pub struct StaticPage {
    pub status: u16,
    pub body: String,
}

/// In-memory fetcher keyed by exact URL. Unknown URLs fail like an unreachable host.
/// Used by tests and local fixture runs.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, StaticPage>,
    calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(
            url.to_string(),
            StaticPage {
                status: 200,
                body: body.into(),
            },
        );
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(
            url.to_string(),
            StaticPage {
                status,
                body: String::new(),
            },
        );
        self
    }

    /// URLs requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        if let Ok(mut g) = self.calls.lock() {
            g.push(url.to_string());
        }
        match self.pages.get(url) {
            Some(p) if (200..300).contains(&p.status) => Ok(p.body.clone()),
            Some(p) => Err(FetchFailure::Status(p.status)),
            None => Err(FetchFailure::Network(format!("no route to {url}"))),
        }
    }
}
