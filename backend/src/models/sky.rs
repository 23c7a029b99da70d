use std::fmt;
use std::str::FromStr;

use qtty::Degrees;
use serde::{Deserialize, Serialize};

use crate::error::{SkyMapError, SkyMapResult};

/// Hipparcos catalogue number.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HipparcosId(pub u32);

impl HipparcosId {
    pub fn new(value: u32) -> Self {
        HipparcosId(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for HipparcosId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HIP {}", self.0)
    }
}

/// Solar-system bodies the sky map can plot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 7] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
    ];

    /// Bodies plotted when the configuration does not name any.
    pub const DEFAULT_SELECTION: [CelestialBody; 5] = [
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Moon,
        CelestialBody::Sun,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CelestialBody {
    type Err = SkyMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CelestialBody::ALL
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SkyMapError::UnknownBody(s.to_string()))
    }
}

/// Astrometric catalogue position of a star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogPosition {
    pub ra: Degrees,
    pub dec: Degrees,
    /// Proper motion in right ascension, μα·cosδ.
    pub pm_ra_mas_per_year: f64,
    pub pm_dec_mas_per_year: f64,
    pub parallax_mas: f64,
    /// Julian epoch of `ra`/`dec` (1991.25 for Hipparcos).
    pub epoch_year: f64,
}

/// One row of the star catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarCatalogEntry {
    pub id: HipparcosId,
    pub magnitude: f64,
    pub position: CatalogPosition,
}

/// Something the Position Engine can project onto the local sky.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Body(CelestialBody),
    Star(&'a StarCatalogEntry),
}

impl Target<'_> {
    pub fn label(&self) -> String {
        match self {
            Target::Body(body) => body.name().to_string(),
            Target::Star(star) => star.id.to_string(),
        }
    }
}

/// Horizontal coordinates of an object as seen by the observer.
///
/// Deserialisation goes through [`SkyPosition::new`], so the range checks
/// hold for decoded values too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSkyPosition")]
pub struct SkyPosition {
    pub altitude: Degrees,
    pub azimuth: Degrees,
}

#[derive(Deserialize)]
struct RawSkyPosition {
    altitude: Degrees,
    azimuth: Degrees,
}

impl TryFrom<RawSkyPosition> for SkyPosition {
    type Error = SkyMapError;

    fn try_from(raw: RawSkyPosition) -> SkyMapResult<Self> {
        SkyPosition::new(raw.altitude.value(), raw.azimuth.value())
    }
}

impl SkyPosition {
    /// Validate and normalise a horizontal position.
    ///
    /// Altitude must lie in [-90, 90]; azimuth is wrapped into [0, 360).
    pub fn new(altitude_deg: f64, azimuth_deg: f64) -> SkyMapResult<Self> {
        if !altitude_deg.is_finite() || !azimuth_deg.is_finite() {
            return Err(SkyMapError::Ephemeris(format!(
                "non-finite horizontal position (alt={}, az={})",
                altitude_deg, azimuth_deg
            )));
        }
        if !(-90.0..=90.0).contains(&altitude_deg) {
            return Err(SkyMapError::Ephemeris(format!(
                "altitude {} outside [-90, 90]",
                altitude_deg
            )));
        }
        let mut azimuth = Degrees::new(azimuth_deg).wrap_pos();
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if azimuth.value() >= 360.0 {
            azimuth = Degrees::new(0.0);
        }
        Ok(Self {
            altitude: Degrees::new(altitude_deg),
            azimuth,
        })
    }

    /// Strictly above the horizon. An object at exactly 0° is not visible.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude.value() > 0.0
    }
}

/// A solar-system body above the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleBody {
    pub body: CelestialBody,
    pub position: SkyPosition,
}

/// A catalogue star above the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleStar {
    pub id: HipparcosId,
    pub magnitude: f64,
    pub position: SkyPosition,
}
