//! PD Engine API Server
//!
//! HTTP surface over the PD signal extraction and severity classification
//! engine: plot image uploads, per-sensor classification, verdict fusion and
//! whole-survey assessment.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod error;
mod routes;

pub use config::{AppConfig, ServerConfig};
pub use error::{ApiError, StartupError};

use pd_engine::PdEngine;

/// Application state shared across handlers
pub struct AppState {
    /// Immutable engine; shared without locking
    pub engine: PdEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Largest accepted request body
    pub max_image_bytes: usize,
    /// Prometheus renderer, when the recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: PdEngine, max_image_bytes: usize) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            max_image_bytes,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_image_bytes;
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/extract/prpd", post(routes::extract::extract_prpd))
        .route("/api/v1/extract/waveform", post(routes::extract::extract_waveform))
        .route("/api/v1/classify", post(routes::classify::classify))
        .route("/api/v1/fuse", post(routes::classify::fuse))
        .route("/api/v1/assess", post(routes::assess::assess))
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Initialize logging
pub fn init_logging(config: &ServerConfig) -> Result<(), StartupError> {
    let level: Level = config
        .log_level
        .parse()
        .map_err(|_| StartupError::Logging(format!("unknown log level {:?}", config.log_level)))?;

    let builder = FmtSubscriber::builder().with_max_level(level).with_target(true);
    let result = if config.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| StartupError::Logging(e.to_string()))
}

/// Install the global Prometheus recorder
pub fn install_metrics() -> Result<PrometheusHandle, StartupError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| StartupError::Metrics(e.to_string()))
}

/// Run the server until it fails
pub async fn run_server(config: AppConfig) -> Result<(), StartupError> {
    let engine = PdEngine::new(config.engine)?;
    let handle = install_metrics()?;
    let state = Arc::new(AppState::new(engine, config.server.max_image_bytes).with_metrics(handle));
    let app = create_router(state);

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
