use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shuttle_axum::axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::analyze::{ArticleInput, SentimentReport, SentimentService};
use crate::config::sentiment::AVAILABLE_MODELS;
use crate::ingest::scheduler::{LatestScrape, ScrapeSnapshot};
use crate::ingest::types::{ArticleRecord, Source};
use crate::ingest::Aggregator;
use crate::pipeline::{self, PipelineRun};
use crate::sentiment::Sentiment;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub sentiment: Arc<SentimentService>,
    /// Filled by the background scheduler when it runs.
    pub latest: LatestScrape,
}

impl AppState {
    pub fn new(aggregator: Aggregator, sentiment: SentimentService) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            sentiment: Arc::new(sentiment),
            latest: LatestScrape::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/scrape", get(scrape_all))
        .route("/scrape/latest", get(latest_scrape))
        .route("/scrape/{source}", get(scrape_source))
        .route("/analyze", post(analyze))
        .route("/analyze/single", post(analyze_single))
        .route("/models", get(models))
        .route("/pipeline", get(run_pipeline))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct ScrapeResp {
    success: bool,
    count: usize,
    articles: Vec<ArticleRecord>,
}

#[derive(Serialize)]
struct LatestResp {
    success: bool,
    #[serde(flatten)]
    snapshot: ScrapeSnapshot,
}

#[derive(Serialize)]
struct ErrorResp {
    success: bool,
    error: String,
}

#[derive(Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    articles: Vec<ArticleInput>,
}

#[derive(Serialize)]
struct AnalyzeResp {
    success: bool,
    #[serde(flatten)]
    report: SentimentReport,
}

#[derive(Serialize)]
struct SingleResp {
    success: bool,
    title: String,
    sentiment: Sentiment,
    confidence: f32,
    summary: String,
    key_points: Vec<String>,
    raw_analysis: String,
}

#[derive(Serialize)]
struct ModelsResp {
    current_model: String,
    available_models: Vec<&'static str>,
}

#[derive(Serialize)]
struct PipelineResp {
    success: bool,
    #[serde(flatten)]
    run: PipelineRun,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResp {
            success: false,
            error: error.into(),
        }),
    )
        .into_response()
}

/// Run `fut` on its own task so a panic surfaces as an error string instead of
/// tearing down the connection.
async fn guarded<F, T>(fut: F) -> Result<T, String>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(fut).await.map_err(|e| e.to_string())
}

fn scrape_envelope(endpoint: &str, res: Result<Vec<ArticleRecord>, String>) -> Response {
    match res {
        Ok(articles) => Json(ScrapeResp {
            success: true,
            count: articles.len(),
            articles,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(endpoint, error = %e, "scrape endpoint failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": "scraper" }))
}

async fn scrape_all(State(state): State<AppState>) -> Response {
    let agg = state.aggregator.clone();
    let res = guarded(async move { agg.scrape_all().await }).await;
    scrape_envelope("/scrape", res)
}

async fn scrape_source(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(source) = Source::from_slug(&slug) else {
        return error_response(StatusCode::NOT_FOUND, format!("unknown source '{slug}'"));
    };
    let agg = state.aggregator.clone();
    let res = guarded(async move { agg.scrape_one(source).await }).await;
    scrape_envelope(source.slug(), res)
}

async fn latest_scrape(State(state): State<AppState>) -> Response {
    match state.latest.get().await {
        Some(snapshot) => Json(LatestResp {
            success: true,
            snapshot,
        })
        .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "no scheduled scrape has completed yet",
        ),
    }
}

async fn analyze(State(state): State<AppState>, Json(body): Json<AnalyzeReq>) -> Response {
    if body.articles.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No articles provided");
    }
    let svc = state.sentiment.clone();
    match guarded(async move { svc.analyze_articles(&body.articles).await }).await {
        Ok(report) => Json(AnalyzeResp {
            success: true,
            report,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "sentiment analysis failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

async fn analyze_single(State(state): State<AppState>, Json(article): Json<ArticleInput>) -> Response {
    let svc = state.sentiment.clone();
    match guarded(async move { svc.analyze_single(&article).await }).await {
        Ok(a) => Json(SingleResp {
            success: true,
            title: a.result.title,
            sentiment: a.result.sentiment,
            confidence: a.result.confidence,
            summary: a.result.summary,
            key_points: a.result.key_points,
            raw_analysis: a.raw_analysis,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "single-article analysis failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

async fn models(State(state): State<AppState>) -> Json<ModelsResp> {
    Json(ModelsResp {
        current_model: state.sentiment.model().to_string(),
        available_models: AVAILABLE_MODELS.to_vec(),
    })
}

async fn run_pipeline(State(state): State<AppState>) -> Response {
    let agg = state.aggregator.clone();
    let svc = state.sentiment.clone();
    match guarded(async move { pipeline::run(&agg, &svc).await }).await {
        Ok(run) => Json(PipelineResp { success: true, run }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "pipeline run failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}
