//! LLM adapter: provider abstraction for the sentiment service.
//! Failures come back as [`LlmError`]; the service decides the fallback text.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::sentiment::{LlmMode, SentimentConfig};

/// Why the LLM produced no answer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    /// Endpoint unreachable, timed out, non-2xx, or LLM disabled.
    #[error("llm unavailable: {0}")]
    Unavailable(String),
    /// Endpoint answered 2xx but the body was not a usable generate reply.
    #[error("llm reply malformed: {0}")]
    Malformed(String),
}

/// Boxed future returned by [`LlmClient::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;

/// Trait object used by the analysis service and tests.
pub trait LlmClient: Send + Sync {
    /// Send a prompt and return the model's raw text (possibly empty).
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

/// Convenient alias used by callers.
pub type DynLlmClient = Arc<dyn LlmClient>;

/// Factory: build a client according to config.
///
/// * `LlmMode::Mock` returns a deterministic mock client.
/// * `LlmMode::Off` returns a disabled client.
/// * Otherwise an Ollama-compatible `generate` client.
pub fn build_client_from_config(config: &SentimentConfig) -> DynLlmClient {
    match config.mode {
        LlmMode::Mock => Arc::new(MockClient {
            fixed: "Analysis reveals a neutral sentiment (mock).".to_string(),
        }),
        LlmMode::Off => Arc::new(DisabledClient),
        LlmMode::Ollama => match OllamaProvider::new(config) {
            Ok(p) => Arc::new(p),
            Err(e) => {
                tracing::warn!(error = ?e, "ollama client init failed; LLM disabled");
                Arc::new(DisabledClient)
            }
        },
    }
}

/// Ollama `/api/generate` client (non-streaming).
pub struct OllamaProvider {
    http: reqwest::Client,
    api_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(config: &SentimentConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("crypto-news-aggregator/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        })
    }
}

impl LlmClient for OllamaProvider {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(async move {
            #[derive(Serialize)]
            struct Req<'a> {
                model: &'a str,
                prompt: &'a str,
                stream: bool,
            }
            #[derive(Deserialize)]
            struct Resp {
                #[serde(default)]
                response: String,
            }

            let req = Req {
                model: &self.model,
                prompt,
                stream: false,
            };
            let resp = self
                .http
                .post(&self.api_url)
                .json(&req)
                .send()
                .await
                .map_err(|e| LlmError::Unavailable(e.to_string()))?;
            let status = resp.status();
            if !status.is_success() {
                return Err(LlmError::Unavailable(format!("http status {}", status.as_u16())));
            }
            let body: Resp = resp.json().await.map_err(|e| {
                if e.is_decode() {
                    LlmError::Malformed(e.to_string())
                } else {
                    LlmError::Unavailable(e.to_string())
                }
            })?;
            Ok(body.response.trim().to_string())
        })
    }
    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}

/// Always unavailable; used when the LLM is disabled.
pub struct DisabledClient;

impl LlmClient for DisabledClient {
    fn generate<'a>(&'a self, _prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(async { Err(LlmError::Unavailable("llm disabled".into())) })
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Simple mock client for tests/local runs.
#[derive(Clone)]
pub struct MockClient {
    pub fixed: String,
}

impl LlmClient for MockClient {
    fn generate<'a>(&'a self, _prompt: &'a str) -> GenerateFuture<'a> {
        let out = self.fixed.clone();
        Box::pin(async move { Ok(out) })
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
