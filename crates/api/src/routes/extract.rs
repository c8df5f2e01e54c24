//! Plot Extraction Routes

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use pd_engine::{ExtractionResult, PrpdPoint, SignalKind, WaveformPoint};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Query parameters for extraction endpoints
#[derive(Debug, Deserialize)]
pub struct SensorQuery {
    /// Sensor type label (TEV, HFCT, Ultrasonic, ...)
    #[serde(default)]
    pub sensor: String,
}

fn record(kind: SignalKind, indication: &'static str, started: Instant) {
    let kind = kind.to_string();
    metrics::counter!("pd_extractions_total", "kind" => kind.clone(), "indication" => indication).increment(1);
    metrics::histogram!("pd_extraction_seconds", "kind" => kind).record(started.elapsed().as_secs_f64());
}

/// Extract a PRPD scatter plot
pub async fn extract_prpd(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SensorQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<ExtractionResult<PrpdPoint>>, ApiError> {
    let Query(query) = query?;
    let started = Instant::now();
    debug!("PRPD upload: {} bytes, sensor {:?}", body.len(), query.sensor);

    let result = tokio::task::spawn_blocking(move || state.engine.extract_prpd(&body, &query.sensor)).await??;

    record(SignalKind::Prpd, result.indication.label(), started);
    Ok(Json(result))
}

/// Extract a waveform trace
pub async fn extract_waveform(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SensorQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<ExtractionResult<WaveformPoint>>, ApiError> {
    let Query(query) = query?;
    let started = Instant::now();
    debug!("Waveform upload: {} bytes, sensor {:?}", body.len(), query.sensor);

    let result =
        tokio::task::spawn_blocking(move || state.engine.extract_waveform(&body, &query.sensor)).await??;

    record(SignalKind::Waveform, result.indication.label(), started);
    Ok(Json(result))
}
