//! Classification and Fusion Routes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use pd_engine::{FusedVerdict, MethodVerdict, SensorReading};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

/// Request body for the fuse endpoint
#[derive(Debug, Deserialize)]
pub struct FuseRequest {
    #[serde(default)]
    pub verdicts: Vec<MethodVerdict>,
}

/// Grade one sensing method's readings
pub async fn classify(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SensorReading>, JsonRejection>,
) -> Result<Json<MethodVerdict>, ApiError> {
    let Json(reading) = payload?;
    let verdict = state.engine.classify(&reading);

    let severity = verdict.severity().map_or("no_data", |s| s.as_str());
    metrics::counter!(
        "pd_classifications_total",
        "method" => verdict.method.as_str(),
        "severity" => severity
    )
    .increment(1);

    Ok(Json(verdict))
}

/// Fuse per-method verdicts from one measurement point
pub async fn fuse(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FuseRequest>, JsonRejection>,
) -> Result<Json<FusedVerdict>, ApiError> {
    let Json(request) = payload?;
    let fused = state.engine.fuse(&request.verdicts);
    metrics::counter!("pd_fusions_total").increment(1);
    Ok(Json(fused))
}
