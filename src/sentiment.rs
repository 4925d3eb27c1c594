//! Sentiment primitives shared by the analysis service: keyword fallback,
//! LLM response parsing, and market-level aggregation.

use serde::{Deserialize, Serialize};

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "surge",
    "rally",
    "gain",
    "bullish",
    "positive",
    "growth",
    "increase",
    "adoption",
    "breakthrough",
    "soar",
    "pump",
    "moon",
    "rising",
    "up",
];

pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "crash",
    "fall",
    "decline",
    "bearish",
    "negative",
    "drop",
    "loss",
    "concern",
    "risk",
    "plunge",
    "dump",
    "down",
    "falling",
    "fear",
];

const FALLBACK_POSITIVE: &str = "Analysis shows a positive sentiment. The market appears bullish with indicators suggesting growth potential. Key factors include increased adoption and positive price action.";
const FALLBACK_NEGATIVE: &str = "Analysis indicates a negative sentiment. The market shows bearish signals with concerns about potential downside. Key factors include declining metrics and risk indicators.";
const FALLBACK_NEUTRAL: &str = "Analysis reveals a neutral sentiment. The market shows mixed signals with no clear directional bias. Investors should monitor for clearer trends before making decisions.";
/// Analysis used when the LLM answered but the reply could not be read.
pub const UNREADABLE_REPLY_ANALYSIS: &str = "Neutral market sentiment detected. Analysis indicates balanced market conditions with no strong directional bias.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketSentiment {
    pub fn outlook(self) -> &'static str {
        match self {
            MarketSentiment::Bullish => {
                "Market sentiment is predominantly positive based on recent news."
            }
            MarketSentiment::Bearish => {
                "Market sentiment is predominantly negative based on recent news."
            }
            MarketSentiment::Neutral => "Market sentiment is mixed with no clear direction.",
        }
    }
}

/// Structured view of one free-text analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSentiment {
    pub sentiment: Sentiment,
    pub confidence: f32,
    pub summary: String,
    pub key_points: Vec<String>,
}

/// Alphanumeric, lower-cased tokens.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

/// Keyword-only classification of article text. Positive keywords are checked
/// first, so mixed text reads as positive.
pub fn keyword_sentiment(text: &str) -> Sentiment {
    let tokens: Vec<String> = tokenize(text).collect();
    let hit = |set: &[&str]| tokens.iter().any(|t| set.contains(&t.as_str()));
    if hit(POSITIVE_KEYWORDS) {
        Sentiment::Positive
    } else if hit(NEGATIVE_KEYWORDS) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Canned analysis text used when the LLM is unavailable.
pub fn fallback_analysis(text: &str) -> &'static str {
    match keyword_sentiment(text) {
        Sentiment::Positive => FALLBACK_POSITIVE,
        Sentiment::Negative => FALLBACK_NEGATIVE,
        Sentiment::Neutral => FALLBACK_NEUTRAL,
    }
}

/// Turn a free-text analysis into sentiment, confidence, summary, key points.
pub fn parse_response(response: &str) -> ParsedSentiment {
    let lower = response.to_lowercase();
    let (sentiment, confidence) = if lower.contains("positive") || lower.contains("bullish") {
        (Sentiment::Positive, 0.7)
    } else if lower.contains("negative") || lower.contains("bearish") {
        (Sentiment::Negative, 0.7)
    } else {
        (Sentiment::Neutral, 0.5)
    };

    let sentences: Vec<String> = response
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let summary = sentences
        .first()
        .cloned()
        .unwrap_or_else(|| response.chars().take(200).collect());
    let key_points = sentences.into_iter().take(3).collect();

    ParsedSentiment {
        sentiment,
        confidence,
        summary,
        key_points,
    }
}

/// Majority vote over per-article sentiments; ties are neutral.
pub fn overall(sentiments: &[Sentiment]) -> MarketSentiment {
    let pos = sentiments.iter().filter(|s| **s == Sentiment::Positive).count();
    let neg = sentiments.iter().filter(|s| **s == Sentiment::Negative).count();
    match pos.cmp(&neg) {
        std::cmp::Ordering::Greater => MarketSentiment::Bullish,
        std::cmp::Ordering::Less => MarketSentiment::Bearish,
        std::cmp::Ordering::Equal => MarketSentiment::Neutral,
    }
}
