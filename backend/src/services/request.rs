//! Request handling: location/date/hour in, chart or object list out.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::locations;
use super::sky_map::{render_objects, visible_objects, RenderStyle};
use crate::api::{ChartSpec, SkyLocation, SkyMapResponse};
use crate::astro::SiderustEphemeris;
use crate::catalog::{hipparcos, StarCatalog};
use crate::config::SkyMapConfig;
use crate::engine::{EphemerisProvider, PositionEngine, SkyMapObjects};
use crate::error::SkyMapResult;
use crate::models::ObservationTime;

/// Inputs of one sky map computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyMapRequest {
    /// Name from the location table.
    pub location: String,
    /// `YYYY-MM-DD` or an ISO date-time; only the date part is used.
    pub date: String,
    /// UTC hour, 0-23.
    pub hour: i64,
}

impl SkyMapRequest {
    pub fn new(location: impl Into<String>, date: impl Into<String>, hour: i64) -> Self {
        Self {
            location: location.into(),
            date: date.into(),
            hour,
        }
    }
}

/// Owns the Position Engine and render style; recomputes on every call.
#[derive(Debug, Clone)]
pub struct SkyMapService {
    engine: PositionEngine,
    style: RenderStyle,
}

impl SkyMapService {
    pub fn new(engine: PositionEngine, style: RenderStyle) -> Self {
        Self { engine, style }
    }

    /// Build the service described by a configuration: load the catalogue and
    /// set up the siderust ephemeris.
    pub fn from_config(config: &SkyMapConfig) -> SkyMapResult<Self> {
        let catalog =
            hipparcos::load_with_fallback(&config.catalog_path(), &config.fallback_catalog_path())?;
        Self::with_catalog(config, catalog)
    }

    /// Like [`SkyMapService::from_config`] with an already loaded catalogue.
    pub fn with_catalog(config: &SkyMapConfig, catalog: StarCatalog) -> SkyMapResult<Self> {
        let ephemeris: Arc<dyn EphemerisProvider> = match config.atmosphere() {
            Some(atmosphere) => Arc::new(SiderustEphemeris::with_refraction(atmosphere)),
            None => Arc::new(SiderustEphemeris::new()),
        };
        let engine = PositionEngine::new(ephemeris, Arc::new(catalog), config.bodies()?);
        Ok(Self::new(engine, RenderStyle::from_palette(&config.palette)))
    }

    pub fn engine(&self) -> &PositionEngine {
        &self.engine
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Resolve the request and run the Position Engine.
    pub fn compute(
        &self,
        request: &SkyMapRequest,
    ) -> SkyMapResult<(SkyLocation, ObservationTime, SkyMapObjects)> {
        let location = locations::lookup(&request.location)?;
        let time = ObservationTime::parse(&request.date, request.hour)?;
        let observer = location.observer()?;
        let objects = self.engine.compute(&observer, &time)?;
        debug!(
            "Sky map for {} at {}: {} bodies, {} stars",
            location.name,
            time,
            objects.bodies.len(),
            objects.stars.len()
        );
        Ok((location, time, objects))
    }

    /// Chart description for a request.
    pub fn sky_map(&self, request: &SkyMapRequest) -> SkyMapResult<ChartSpec> {
        let (_, _, objects) = self.compute(request)?;
        Ok(render_objects(&objects, &self.style))
    }

    /// Visible objects with positions and render attributes.
    pub fn objects(&self, request: &SkyMapRequest) -> SkyMapResult<SkyMapResponse> {
        let (location, time, objects) = self.compute(request)?;
        Ok(SkyMapResponse {
            location: location.name,
            latitude: location.latitude,
            longitude: location.longitude,
            time: time.to_string(),
            body_count: objects.bodies.len(),
            star_count: objects.stars.len(),
            objects: visible_objects(&objects, &self.style),
        })
    }
}
