// src/config/sentiment.rs
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_OLLAMA_API_URL: &str = "OLLAMA_API_URL";
pub const ENV_OLLAMA_MODEL: &str = "OLLAMA_MODEL";
/// "off" disables the LLM, "mock" uses the deterministic mock, anything else = Ollama.
pub const ENV_SENTIMENT_LLM: &str = "SENTIMENT_LLM";

pub const DEFAULT_OLLAMA_API_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama2";
/// Models advertised by `GET /models`.
pub const AVAILABLE_MODELS: [&str; 4] = ["llama2", "mistral", "mixtral", "neural-chat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmMode {
    Ollama,
    Mock,
    Off,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    pub mode: LlmMode,
    pub api_url: String,
    pub model: String,
    /// Request timeout for one generate call.
    pub timeout_secs: u64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            mode: LlmMode::Ollama,
            api_url: DEFAULT_OLLAMA_API_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl SentimentConfig {
    /// Keyword-only configuration; never touches the network.
    pub fn offline() -> Self {
        Self {
            mode: LlmMode::Off,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(u) = env::var(ENV_OLLAMA_API_URL) {
            if !u.trim().is_empty() {
                cfg.api_url = u.trim().to_string();
            }
        }
        if let Ok(m) = env::var(ENV_OLLAMA_MODEL) {
            if !m.trim().is_empty() {
                cfg.model = m.trim().to_string();
            }
        }
        cfg.mode = match env::var(ENV_SENTIMENT_LLM)
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "off" | "0" | "false" => LlmMode::Off,
            "mock" => LlmMode::Mock,
            _ => LlmMode::Ollama,
        };
        cfg
    }
}
