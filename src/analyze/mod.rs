// src/analyze/mod.rs
//! Sentiment analysis service: prompts the LLM per article, falls back to
//! keyword analysis when it has no answer, and aggregates a market view.

pub mod ai_adapter;

use serde::{Deserialize, Serialize};

use crate::analyze::ai_adapter::{build_client_from_config, DynLlmClient, LlmError};
use crate::config::sentiment::{SentimentConfig, DEFAULT_OLLAMA_MODEL};
use crate::ingest::types::ArticleRecord;
use crate::sentiment::{self, MarketSentiment, Sentiment};

/// Article text sent to the LLM is capped to this many chars.
const PROMPT_TEXT_CHARS: usize = 1000;

/// Wire shape accepted by `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleInput {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<&ArticleRecord> for ArticleInput {
    fn from(r: &ArticleRecord) -> Self {
        Self {
            title: r.title.clone(),
            text: r.text.clone(),
            source: Some(r.source.display_name().to_string()),
            url: Some(r.url.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentResult {
    pub title: String,
    pub sentiment: Sentiment,
    pub confidence: f32,
    pub summary: String,
    pub key_points: Vec<String>,
    /// True when the keyword fallback produced this result.
    pub fallback: bool,
}

/// One-article analysis as served by `POST /analyze/single`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SingleAnalysis {
    #[serde(flatten)]
    pub result: SentimentResult,
    /// Text the sentiment was parsed from (LLM reply or fallback analysis).
    pub raw_analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentReport {
    pub results: Vec<SentimentResult>,
    pub overall_sentiment: MarketSentiment,
    pub market_outlook: String,
}

pub fn build_prompt(article: &ArticleInput) -> String {
    let text: String = article.text.chars().take(PROMPT_TEXT_CHARS).collect();
    format!(
        "Analyze the sentiment of this crypto news article and provide:\n\
         1. Overall sentiment (positive, negative, or neutral)\n\
         2. Confidence level\n\
         3. Brief summary\n\
         4. Key points\n\n\
         Article Title: {}\n\
         Article Text: {}\n\n\
         Provide a concise analysis focusing on market sentiment and implications.",
        article.title, text
    )
}

/// Shorter prompt used for single-article requests.
pub fn build_single_prompt(article: &ArticleInput) -> String {
    let text: String = article.text.chars().take(PROMPT_TEXT_CHARS).collect();
    format!(
        "Analyze the sentiment of this crypto news article:\n\n\
         Title: {}\n\
         Text: {}\n\n\
         Provide sentiment (positive/negative/neutral), confidence, and key insights.",
        article.title, text
    )
}

pub struct SentimentService {
    client: DynLlmClient,
    model: String,
}

impl SentimentService {
    pub fn new(client: DynLlmClient) -> Self {
        Self {
            client,
            model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }

    pub fn from_config(cfg: &SentimentConfig) -> Self {
        Self {
            client: build_client_from_config(cfg),
            model: cfg.model.clone(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    /// Model name sent with every generate request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the LLM; on failure substitute a canned analysis.
    /// Returns the analysis text and whether it is a fallback.
    async fn ask(&self, prompt: &str, article: &ArticleInput) -> (String, bool) {
        match self.client.generate(prompt).await {
            Ok(answer) => (answer, false),
            Err(LlmError::Unavailable(reason)) => {
                tracing::warn!(%reason, "LLM unavailable; using keyword analysis");
                let basis = format!("{} {}", article.title, article.text);
                (sentiment::fallback_analysis(&basis).to_string(), true)
            }
            Err(LlmError::Malformed(reason)) => {
                tracing::error!(%reason, "LLM reply unreadable; reporting neutral");
                (sentiment::UNREADABLE_REPLY_ANALYSIS.to_string(), true)
            }
        }
    }

    pub async fn analyze_one(&self, article: &ArticleInput) -> SentimentResult {
        let (raw, fallback) = self.ask(&build_prompt(article), article).await;
        to_result(article, &raw, fallback)
    }

    pub async fn analyze_single(&self, article: &ArticleInput) -> SingleAnalysis {
        let (raw, fallback) = self.ask(&build_single_prompt(article), article).await;
        SingleAnalysis {
            result: to_result(article, &raw, fallback),
            raw_analysis: raw,
        }
    }

    /// Analyze articles one after another and aggregate a market view.
    pub async fn analyze_articles(&self, articles: &[ArticleInput]) -> SentimentReport {
        let mut results = Vec::with_capacity(articles.len());
        for a in articles {
            results.push(self.analyze_one(a).await);
        }
        let sentiments: Vec<Sentiment> = results.iter().map(|r| r.sentiment).collect();
        let overall = sentiment::overall(&sentiments);
        tracing::info!(
            provider = self.provider_name(),
            articles = results.len(),
            fallback = results.iter().filter(|r| r.fallback).count(),
            overall = ?overall,
            "sentiment analysis finished"
        );
        SentimentReport {
            results,
            overall_sentiment: overall,
            market_outlook: overall.outlook().to_string(),
        }
    }
}

fn to_result(article: &ArticleInput, raw: &str, fallback: bool) -> SentimentResult {
    let parsed = sentiment::parse_response(raw);
    SentimentResult {
        title: article.title.clone(),
        sentiment: parsed.sentiment,
        confidence: parsed.confidence,
        summary: parsed.summary,
        key_points: parsed.key_points,
        fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::ai_adapter::{GenerateFuture, LlmClient, MockClient};
    use std::sync::Arc;

    /// Answers 2xx with a body that cannot be read.
    struct GarbledClient;

    impl LlmClient for GarbledClient {
        fn generate<'a>(&'a self, _prompt: &'a str) -> GenerateFuture<'a> {
            Box::pin(async { Err(LlmError::Malformed("expected value at line 1".into())) })
        }
        fn provider_name(&self) -> &'static str {
            "garbled"
        }
    }

    fn article(title: &str, text: &str) -> ArticleInput {
        ArticleInput {
            title: title.into(),
            text: text.into(),
            source: None,
            url: None,
        }
    }

    #[test]
    fn prompt_caps_article_text() {
        let a = article("Bitcoin ETF inflows hit record", &"x".repeat(5000));
        let p = build_prompt(&a);
        assert!(p.contains("Article Title: Bitcoin ETF inflows hit record"));
        assert_eq!(p.matches('x').count(), PROMPT_TEXT_CHARS);
    }

    #[tokio::test]
    async fn offline_service_uses_keyword_fallback() {
        let svc = SentimentService::from_config(&SentimentConfig::offline());
        let report = svc
            .analyze_articles(&[
                article("Bitcoin prices surge to new highs", "Rally continues."),
                article("Exchange hack triggers sell-off", "Tokens plunge overnight."),
                article("Solana rally extends gains", ""),
            ])
            .await;
        let s: Vec<Sentiment> = report.results.iter().map(|r| r.sentiment).collect();
        assert_eq!(
            s,
            vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Positive]
        );
        assert!(report.results.iter().all(|r| r.fallback));
        assert_eq!(report.overall_sentiment, MarketSentiment::Bullish);
        assert_eq!(report.market_outlook, MarketSentiment::Bullish.outlook());
    }

    #[tokio::test]
    async fn llm_answer_is_parsed_not_overridden() {
        let svc = SentimentService::new(Arc::new(MockClient {
            fixed: "The outlook is bearish. Liquidity is thin.".into(),
        }));
        let r = svc
            .analyze_one(&article("Bitcoin prices surge to new highs", ""))
            .await;
        assert_eq!(r.sentiment, Sentiment::Negative);
        assert!(!r.fallback);
        assert_eq!(r.summary, "The outlook is bearish");
    }

    #[tokio::test]
    async fn unreadable_reply_is_neutral_regardless_of_keywords() {
        let svc = SentimentService::new(Arc::new(GarbledClient));
        let r = svc
            .analyze_single(&article("Bitcoin prices surge to new highs", "Rally."))
            .await;
        assert_eq!(r.result.sentiment, Sentiment::Neutral);
        assert!(r.result.fallback);
        assert_eq!(r.raw_analysis, sentiment::UNREADABLE_REPLY_ANALYSIS);
    }

    #[tokio::test]
    async fn single_analysis_keeps_raw_text() {
        let svc = SentimentService::new(Arc::new(MockClient {
            fixed: "Bullish tone. ETF demand is strong. Miners hold.".into(),
        }));
        let r = svc.analyze_single(&article("ETF demand climbs", "")).await;
        assert_eq!(r.raw_analysis, "Bullish tone. ETF demand is strong. Miners hold.");
        assert_eq!(r.result.sentiment, Sentiment::Positive);
        assert_eq!(r.result.key_points.len(), 3);
    }

    #[test]
    fn model_comes_from_config() {
        let cfg = SentimentConfig {
            model: "mistral".into(),
            ..SentimentConfig::offline()
        };
        assert_eq!(SentimentService::from_config(&cfg).model(), "mistral");
        assert_eq!(
            SentimentService::new(Arc::new(MockClient { fixed: String::new() })).model(),
            DEFAULT_OLLAMA_MODEL
        );
    }

    #[test]
    fn single_prompt_uses_short_template() {
        let p = build_single_prompt(&article("Ether slips", &"y".repeat(3000)));
        assert!(p.starts_with("Analyze the sentiment of this crypto news article:\n\nTitle: Ether slips"));
        assert_eq!(p.matches('y').count(), PROMPT_TEXT_CHARS);
    }
}
