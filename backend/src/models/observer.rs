use qtty::Degrees;
use serde::{Deserialize, Serialize};

use crate::error::{SkyMapError, SkyMapResult};

/// Geographic position of the observer on the Earth's surface.
///
/// Latitude is geodetic (WGS-84), longitude is positive east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub latitude: Degrees,
    pub longitude: Degrees,
    #[serde(default)]
    pub elevation_m: f64,
}

impl Observer {
    /// Create an observer at sea level.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> SkyMapResult<Self> {
        Self::with_elevation(latitude_deg, longitude_deg, 0.0)
    }

    /// Create an observer at the given height above the ellipsoid.
    pub fn with_elevation(
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
    ) -> SkyMapResult<Self> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(SkyMapError::InvalidObserver(format!(
                "latitude {} outside [-90, 90]",
                latitude_deg
            )));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(SkyMapError::InvalidObserver(format!(
                "longitude {} outside [-180, 180]",
                longitude_deg
            )));
        }
        if !elevation_m.is_finite() {
            return Err(SkyMapError::InvalidObserver(
                "elevation must be finite".to_string(),
            ));
        }
        Ok(Self {
            latitude: Degrees::new(latitude_deg),
            longitude: Degrees::new(longitude_deg),
            elevation_m,
        })
    }
}
