//! Survey Assessment Route

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use pd_engine::{PointAssessment, ReadingPoint};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Request body: raw readings grouped by measurement point
#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    #[serde(default)]
    pub points: Vec<ReadingPoint>,
}

#[derive(Debug, Serialize)]
pub struct AssessResponse {
    pub points: Vec<PointAssessment>,
    pub count: usize,
}

/// Classify every reading and fuse per measurement point
pub async fn assess(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AssessRequest>, JsonRejection>,
) -> Result<Json<AssessResponse>, ApiError> {
    let Json(request) = payload?;
    let points = state.engine.assess_readings(request.points);
    info!("Assessed {} measurement point(s)", points.len());
    metrics::counter!("pd_assessed_points_total").increment(points.len() as u64);

    Ok(Json(AssessResponse {
        count: points.len(),
        points,
    }))
}
