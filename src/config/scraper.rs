// src/config/scraper.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_SCRAPER_CONFIG_PATH: &str = "SCRAPER_CONFIG_PATH";
/// Overrides `interval_secs`; "0" disables the scheduler.
pub const ENV_SCRAPE_INTERVAL_SECS: &str = "SCRAPE_INTERVAL_SECS";

/// Upper bound on records per source; config may lower it, never raise it.
pub const MAX_PER_SOURCE_CAP: usize = 5;
/// Lower bound on title length; config may raise it, never lower it.
pub const MIN_TITLE_CHARS_FLOOR: usize = 20;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_max_per_source() -> usize {
    MAX_PER_SOURCE_CAP
}
fn default_min_title_chars() -> usize {
    MIN_TITLE_CHARS_FLOOR
}
fn default_max_text_chars() -> usize {
    5000
}

/// Scraper tuning knobs. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScraperConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Hard cap on records emitted by one adapter run.
    #[serde(default = "default_max_per_source")]
    pub max_per_source: usize,
    /// Titles shorter than this (in chars) are dropped.
    #[serde(default = "default_min_title_chars")]
    pub min_title_chars: usize,
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    /// Seconds between background scrapes; `None` disables the scheduler.
    #[serde(default)]
    pub interval_secs: Option<u64>,
    /// Listing URL overrides keyed by source slug ("coindesk", "cointelegraph", "yahoo").
    #[serde(default)]
    pub listing_urls: HashMap<String, String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_per_source: default_max_per_source(),
            min_title_chars: default_min_title_chars(),
            max_text_chars: default_max_text_chars(),
            interval_secs: None,
            listing_urls: HashMap::new(),
        }
    }
}

impl ScraperConfig {
    /// Load from an explicit path. Supports TOML or JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scraper config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        parse(&content, ext.as_str())
            .with_context(|| format!("parsing scraper config {}", path.display()))
    }

    /// Load using env var + fallbacks:
    /// 1) $SCRAPER_CONFIG_PATH
    /// 2) config/scraper.toml
    /// 3) config/scraper.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_SCRAPER_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("SCRAPER_CONFIG_PATH points to non-existent path"));
        }
        let toml_p = PathBuf::from("config/scraper.toml");
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from("config/scraper.json");
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }

    /// Apply environment overrides on top of file config.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var(ENV_SCRAPE_INTERVAL_SECS) {
            match v.trim().parse::<u64>() {
                Ok(0) => self.interval_secs = None,
                Ok(n) => self.interval_secs = Some(n),
                Err(_) => tracing::warn!(value = %v, "ignoring invalid SCRAPE_INTERVAL_SECS"),
            }
        }
        self
    }

    pub fn listing_url_override(&self, slug: &str) -> Option<&str> {
        self.listing_urls.get(slug).map(String::as_str)
    }
}

fn parse(s: &str, hint_ext: &str) -> Result<ScraperConfig> {
    let cfg: ScraperConfig = if hint_ext == "json" {
        serde_json::from_str(s)?
    } else {
        match toml::from_str(s) {
            Ok(v) => v,
            Err(toml_err) => serde_json::from_str(s).map_err(|_| anyhow!(toml_err))?,
        }
    };
    Ok(sanitize(cfg))
}

// Zero values would silently disable scraping; fall back to defaults instead.
// The record cap and title floor are hard bounds.
fn sanitize(mut cfg: ScraperConfig) -> ScraperConfig {
    if cfg.timeout_secs == 0 {
        cfg.timeout_secs = default_timeout_secs();
    }
    if cfg.max_per_source == 0 {
        cfg.max_per_source = default_max_per_source();
    }
    if cfg.max_per_source > MAX_PER_SOURCE_CAP {
        tracing::warn!(
            requested = cfg.max_per_source,
            cap = MAX_PER_SOURCE_CAP,
            "max_per_source above cap; clamping"
        );
        cfg.max_per_source = MAX_PER_SOURCE_CAP;
    }
    if cfg.min_title_chars < MIN_TITLE_CHARS_FLOOR {
        tracing::warn!(
            requested = cfg.min_title_chars,
            floor = MIN_TITLE_CHARS_FLOOR,
            "min_title_chars below floor; raising"
        );
        cfg.min_title_chars = MIN_TITLE_CHARS_FLOOR;
    }
    if cfg.max_text_chars == 0 {
        cfg.max_text_chars = default_max_text_chars();
    }
    if cfg.user_agent.trim().is_empty() {
        cfg.user_agent = default_user_agent();
    }
    if cfg.interval_secs == Some(0) {
        cfg.interval_secs = None;
    }
    cfg
}
