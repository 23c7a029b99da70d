//! Public API surface for the sky map backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::locations::SkyLocation;
pub use crate::routes::skymap::AngularAxis;
pub use crate::routes::skymap::ChartLayout;
pub use crate::routes::skymap::ChartSpec;
pub use crate::routes::skymap::Marker;
pub use crate::routes::skymap::MarkerLine;
pub use crate::routes::skymap::ObjectKind;
pub use crate::routes::skymap::OneOrMany;
pub use crate::routes::skymap::PolarLayout;
pub use crate::routes::skymap::PolarTrace;
pub use crate::routes::skymap::RadialAxis;
pub use crate::routes::skymap::SkyMapResponse;
pub use crate::routes::skymap::TextFont;
pub use crate::routes::skymap::VisibleObject;

pub use crate::models::{
    CelestialBody, HipparcosId, ObservationTime, Observer, SkyPosition,
    VisibleBody, VisibleStar,
};
