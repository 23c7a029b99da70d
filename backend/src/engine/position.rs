use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::provider::EphemerisProvider;
use crate::catalog::StarCatalog;
use crate::error::{SkyMapError, SkyMapResult};
use crate::models::{
    CelestialBody, ObservationTime, Observer, SkyPosition, Target, VisibleBody, VisibleStar,
};

/// Stars at or fainter than this magnitude are never plotted.
pub const NAKED_EYE_MAGNITUDE_LIMIT: f64 = 6.0;

/// Objects above the horizon for one observer and instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkyMapObjects {
    pub bodies: Vec<VisibleBody>,
    pub stars: Vec<VisibleStar>,
}

impl SkyMapObjects {
    pub fn len(&self) -> usize {
        self.bodies.len() + self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.stars.is_empty()
    }
}

/// Computes apparent positions of the plotted bodies and catalogue stars.
///
/// Holds no per-request state; every method is a pure function of its
/// arguments, the provider and the catalogue.
#[derive(Clone)]
pub struct PositionEngine {
    ephemeris: Arc<dyn EphemerisProvider>,
    catalog: Arc<StarCatalog>,
    bodies: Vec<CelestialBody>,
}

impl PositionEngine {
    /// Build an engine over a provider, a catalogue and the bodies to plot.
    ///
    /// `bodies` keeps its order; it is also the order of
    /// [`PositionEngine::visible_bodies`].
    pub fn new(
        ephemeris: Arc<dyn EphemerisProvider>,
        catalog: Arc<StarCatalog>,
        bodies: Vec<CelestialBody>,
    ) -> Self {
        Self {
            ephemeris,
            catalog,
            bodies,
        }
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn catalog(&self) -> &StarCatalog {
        &self.catalog
    }

    /// Apparent altitude/azimuth of any target.
    pub fn project(
        &self,
        target: Target<'_>,
        observer: &Observer,
        time: &ObservationTime,
    ) -> SkyMapResult<SkyPosition> {
        self.ephemeris.altaz(target, observer, time)
    }

    /// Configured bodies with altitude strictly above 0°, in plotting order.
    pub fn visible_bodies(&self, observer: &Observer, time: &ObservationTime) -> Vec<VisibleBody> {
        self.bodies
            .iter()
            .filter_map(|&body| match self.project(Target::Body(body), observer, time) {
                Ok(position) => Some(VisibleBody { body, position }),
                Err(e) => {
                    warn!("Skipping {}: {}", body, e);
                    None
                }
            })
            .filter(|visible| visible.position.is_above_horizon())
            .collect()
    }

    /// Naked-eye catalogue stars with altitude strictly above 0°.
    ///
    /// The magnitude cut is applied before projection and does not depend on
    /// the observer.
    pub fn visible_stars(&self, observer: &Observer, time: &ObservationTime) -> Vec<VisibleStar> {
        let candidates: Vec<_> = self.catalog.naked_eye().collect();
        let positions = self.ephemeris.altaz_stars(&candidates, observer, time);

        candidates
            .into_iter()
            .zip(positions)
            .filter_map(|(star, result)| match result {
                Ok(position) if position.is_above_horizon() => Some(VisibleStar {
                    id: star.id,
                    magnitude: star.magnitude,
                    position,
                }),
                Ok(_) => None,
                Err(e) => {
                    warn!("Skipping {}: {}", star.id, e);
                    None
                }
            })
            .collect()
    }

    /// Reject instants outside the provider's supported years.
    pub fn check_time(&self, time: &ObservationTime) -> SkyMapResult<()> {
        let years = self.ephemeris.supported_years();
        if years.contains(&time.year()) {
            return Ok(());
        }
        Err(SkyMapError::InvalidDate {
            input: time.date().to_string(),
            reason: format!(
                "outside the supported years {}-{}",
                years.start(),
                years.end()
            ),
        })
    }

    /// Both visible bodies and visible stars.
    pub fn compute(
        &self,
        observer: &Observer,
        time: &ObservationTime,
    ) -> SkyMapResult<SkyMapObjects> {
        self.check_time(time)?;
        let objects = SkyMapObjects {
            bodies: self.visible_bodies(observer, time),
            stars: self.visible_stars(observer, time),
        };
        debug!(
            "{} at ({}, {}): {} bodies, {} stars above the horizon ({} provider)",
            time,
            observer.latitude.value(),
            observer.longitude.value(),
            objects.bodies.len(),
            objects.stars.len(),
            self.ephemeris.name()
        );
        Ok(objects)
    }
}

impl std::fmt::Debug for PositionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionEngine")
            .field("ephemeris", &self.ephemeris.name())
            .field("catalog_stars", &self.catalog.len())
            .field("bodies", &self.bodies)
            .finish()
    }
}
