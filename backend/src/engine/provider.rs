//! Ephemeris provider seam.
//!
//! The Position Engine never computes coordinates itself: it asks an
//! [`EphemerisProvider`] for the horizontal position of each target. The
//! built-in implementation is [`crate::astro::SiderustEphemeris`]; tests
//! substitute fixed-position mocks.

use std::ops::RangeInclusive;

use crate::error::SkyMapResult;
use crate::models::{ObservationTime, Observer, SkyPosition, StarCatalogEntry, Target};

/// Source of apparent horizontal coordinates.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; the HTTP layer shares one provider
/// across blocking worker threads.
pub trait EphemerisProvider: Send + Sync {
    /// Apparent altitude/azimuth of a target for an observer at an instant.
    ///
    /// # Arguments
    /// * `target` - Solar-system body or catalogue star
    /// * `observer` - Geographic position on the Earth
    /// * `time` - UTC instant
    ///
    /// # Returns
    /// * `Ok(SkyPosition)` - Validated horizontal coordinates
    /// * `Err(SkyMapError::Ephemeris)` - If the position cannot be computed
    fn altaz(
        &self,
        target: Target<'_>,
        observer: &Observer,
        time: &ObservationTime,
    ) -> SkyMapResult<SkyPosition>;

    /// Project many stars for one observer and instant.
    ///
    /// The result has one entry per input star, in input order. The default
    /// calls [`EphemerisProvider::altaz`] per star; implementations override
    /// it to share per-instant work.
    fn altaz_stars(
        &self,
        stars: &[&StarCatalogEntry],
        observer: &Observer,
        time: &ObservationTime,
    ) -> Vec<SkyMapResult<SkyPosition>> {
        stars
            .iter()
            .map(|star| self.altaz(Target::Star(star), observer, time))
            .collect()
    }

    /// Calendar years for which positions are trustworthy.
    fn supported_years(&self) -> RangeInclusive<i32> {
        i32::MIN..=i32::MAX
    }

    /// Short name for logs.
    fn name(&self) -> &'static str {
        "ephemeris"
    }
}
