//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
    Json,
};
use chrono::Utc;
use tracing::debug;

use super::dto::{ChartSpec, HealthResponse, LocationListResponse, SkyMapQuery, SkyMapResponse};
use super::error::AppError;
use super::state::AppState;
use crate::services::{locations, SkyMapRequest};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const INDEX_HTML: &str = include_str!("../../static/index.html");

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint reporting the loaded catalogue size.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let catalog = state.service.engine().catalog();
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_stars: catalog.len(),
        naked_eye_stars: catalog.naked_eye().count(),
    }))
}

// =============================================================================
// Page
// =============================================================================

/// GET /
///
/// Single-page UI: location, date and hour pickers above the chart.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(
        INDEX_HTML
            .replace("{{DEFAULT_LOCATION}}", &js_string(&state.defaults.location))
            .replace("{{DEFAULT_HOUR}}", &state.defaults.hour.to_string()),
    )
}

/// Encode `value` as a JavaScript string literal safe inside a `<script>` block.
fn js_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
}

// =============================================================================
// Sky Map Endpoints
// =============================================================================

/// GET /v1/locations
///
/// Fixed table of selectable locations.
pub async fn list_locations(State(state): State<AppState>) -> HandlerResult<LocationListResponse> {
    let locations = locations::all();
    let total = locations.len();
    Ok(Json(LocationListResponse {
        locations,
        total,
        default_location: state.defaults.location.clone(),
    }))
}

/// GET /v1/sky-map?location=&date=&hour=
///
/// Plotly chart description of the sky.
pub async fn get_sky_map(
    State(state): State<AppState>,
    query: Result<Query<SkyMapQuery>, QueryRejection>,
) -> HandlerResult<ChartSpec> {
    let request = resolve_request(&state, query)?;
    debug!("GET /v1/sky-map {:?}", request);

    let service = state.service.clone();
    // Projection of the whole catalogue is CPU-bound
    let chart = tokio::task::spawn_blocking(move || service.sky_map(&request))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(chart))
}

/// GET /v1/sky-map/objects?location=&date=&hour=
///
/// Visible objects with their positions and render attributes.
pub async fn get_sky_map_objects(
    State(state): State<AppState>,
    query: Result<Query<SkyMapQuery>, QueryRejection>,
) -> HandlerResult<SkyMapResponse> {
    let request = resolve_request(&state, query)?;
    debug!("GET /v1/sky-map/objects {:?}", request);

    let service = state.service.clone();
    let response = tokio::task::spawn_blocking(move || service.objects(&request))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(response))
}

fn resolve_request(
    state: &AppState,
    query: Result<Query<SkyMapQuery>, QueryRejection>,
) -> Result<SkyMapRequest, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(SkyMapRequest {
        location: query
            .location
            .unwrap_or_else(|| state.defaults.location.clone()),
        date: query
            .date
            .unwrap_or_else(|| Utc::now().date_naive().to_string()),
        hour: query.hour.unwrap_or(i64::from(state.defaults.hour)),
    })
}
