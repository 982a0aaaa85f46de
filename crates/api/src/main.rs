mod cache;
mod config;
mod metrics;
mod retry;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use cache::DocumentCache;
use config::AppConfig;
use extract::{Extractor, OllamaClient};
use graph::canonical::CanonicalGraph;
use graph::mode::ExtractionMode;
use graph::{export, projection};
use metrics::Metrics;
use retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

struct AppState {
    cache: DocumentCache,
    metrics: Arc<Metrics>,
    config: AppConfig,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = AppConfig::default();

    let client = OllamaClient::new(
        config.model.base_url.clone(),
        config.model.model.clone(),
        Duration::from_secs(config.model.request_timeout_secs),
    );
    let extractor = Arc::new(
        Extractor::new(Arc::new(client)).with_max_terms(config.extraction.max_terms),
    );
    let retry = RetryPolicy::new(
        config.retry.max_retries,
        config.retry.initial_backoff_ms,
        config.retry.max_backoff_ms,
    );

    let metrics = Metrics::new();
    let state = Arc::new(AppState {
        cache: DocumentCache::new(extractor, retry, metrics.clone()),
        metrics,
        config,
    });

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/document", post(upload_document))
        .route("/document/path", post(upload_document_path))
        .route("/graph/:mode", get(get_graph))
        .route("/render/:mode", get(get_render))
        .route("/export/:mode", get(get_export))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind port 3000");

    tracing::info!("Server listening on http://localhost:3000");

    axum::serve(listener, app).await.unwrap();
}

#[derive(Serialize)]
struct HealthResponse {
    model_endpoint: String,
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = match reqwest::get(&state.config.model.base_url).await {
        Ok(resp) if resp.status().is_success() => "ok".to_string(),
        Ok(resp) => format!("error: status {}", resp.status()),
        Err(e) => format!("error: {}", e),
    };
    Json(HealthResponse {
        model_endpoint: status,
    })
}

#[derive(Serialize)]
struct ModeOutcome {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edges: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct DocumentSummary {
    fingerprint: String,
    title: String,
    cached: bool,
    modes: BTreeMap<&'static str, ModeOutcome>,
}

async fn upload_document(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<DocumentSummary>, ApiError> {
    if body.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "empty document body"));
    }
    process_document(&state, &body).await
}

#[derive(Deserialize)]
struct PathUpload {
    path: String,
}

/// Path-based variant for documents already on this machine's disk.
async fn upload_document_path(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PathUpload>,
) -> Result<Json<DocumentSummary>, ApiError> {
    let path = PathBuf::from(&req.path);
    if !path.is_file() {
        return Err(api_error(StatusCode::NOT_FOUND, "no such file"));
    }
    let bytes = ingest::FileReader::read_bytes(&path)
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    process_document(&state, &bytes).await
}

async fn process_document(
    state: &AppState,
    bytes: &[u8],
) -> Result<Json<DocumentSummary>, ApiError> {
    let outcome = state
        .cache
        .ensure(bytes, &state.config.extraction.modes)
        .await;
    state.metrics.record_document(!outcome.recomputed);

    let mut modes = BTreeMap::new();
    for &mode in &state.config.extraction.modes {
        let Some(entry) = outcome.record.graphs.get(&mode) else {
            continue;
        };
        let summary = match entry.value() {
            Ok(graph) => ModeOutcome {
                status: "ok",
                nodes: Some(graph.node_count()),
                edges: Some(graph.edge_count()),
                error: None,
            },
            Err(failure) => ModeOutcome {
                status: "failed",
                nodes: None,
                edges: None,
                error: Some(failure.to_string()),
            },
        };
        modes.insert(mode.as_str(), summary);
    }

    Ok(Json(DocumentSummary {
        fingerprint: outcome.record.fingerprint.clone(),
        title: outcome.record.title.clone(),
        cached: !outcome.recomputed,
        modes,
    }))
}

/// Shared lookup for the read-side endpoints: parse the mode, find the
/// current document, and surface the stored per-mode outcome.
async fn mode_graph(
    state: &AppState,
    mode_str: &str,
) -> Result<(ExtractionMode, CanonicalGraph), ApiError> {
    let mode: ExtractionMode = mode_str
        .parse()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("{e}")))?;
    let record = state
        .cache
        .current()
        .await
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "no document uploaded yet"))?;
    let entry = record.graphs.get(&mode).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            format!("no {mode} graph for the current document"),
        )
    })?;
    match entry.value() {
        Ok(graph) => Ok((mode, graph.clone())),
        Err(failure) => {
            let status = if failure.is_transient() {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };
            Err(api_error(status, failure.to_string()))
        }
    }
}

async fn get_graph(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<CanonicalGraph>, ApiError> {
    let (_, graph) = mode_graph(&state, &mode).await?;
    Ok(Json(graph))
}

async fn get_render(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<projection::RenderConfig>, ApiError> {
    let (mode, graph) = mode_graph(&state, &mode).await?;
    Ok(Json(projection::project(&graph, mode)))
}

async fn get_export(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<String, ApiError> {
    let (mode, graph) = mode_graph(&state, &mode).await?;
    Ok(export::export_text(&graph, mode))
}

#[derive(Serialize)]
struct DocumentStats {
    fingerprint: String,
    title: String,
    modes_present: Vec<&'static str>,
}

#[derive(Serialize)]
struct StatsResponse {
    metrics: metrics::MetricsSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<DocumentStats>,
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let document = state.cache.current().await.map(|record| DocumentStats {
        fingerprint: record.fingerprint.clone(),
        title: record.title.clone(),
        modes_present: record.graphs.iter().map(|e| e.key().as_str()).collect(),
    });
    Json(StatsResponse {
        metrics: state.metrics.snapshot(),
        document,
    })
}
