//! Health check route.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub backend: &'static str,
    pub mappings: u64,
    pub uptime_secs: u64,
}

pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        version: emojimovie_core::core_version(),
        backend: state.backend_name(),
        mappings: state.count()?,
        uptime_secs: state.uptime().as_secs(),
    }))
}
