//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies of the sky map endpoints are re-exported from the routes
//! module since they already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{ChartSpec, SkyLocation, SkyMapResponse, VisibleObject};

/// Query parameters of the sky map endpoints.
///
/// Missing values fall back to the configured location and hour and to the
/// current UTC date.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkyMapQuery {
    #[serde(default)]
    pub location: Option<String>,
    /// `YYYY-MM-DD` or ISO date-time
    #[serde(default)]
    pub date: Option<String>,
    /// UTC hour, 0-23
    #[serde(default)]
    pub hour: Option<i64>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Stars in the loaded catalogue
    pub catalog_stars: usize,
    /// Stars brighter than the naked-eye limit
    pub naked_eye_stars: usize,
}

/// Location list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationListResponse {
    pub locations: Vec<SkyLocation>,
    pub total: usize,
    pub default_location: String,
}
