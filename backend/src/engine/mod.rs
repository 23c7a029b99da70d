//! Position Engine: which objects are above the horizon, and where.

pub mod position;
pub mod provider;

pub use position::{PositionEngine, SkyMapObjects, NAKED_EYE_MAGNITUDE_LIMIT};
pub use provider::EphemerisProvider;
