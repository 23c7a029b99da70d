//! Astronomy backend built on the siderust library.
//!
//! Solar-system bodies go through siderust's VSOP87 and ELP theories and its
//! apparent topocentric pipeline (parallax, precession, nutation, GAST).
//! Catalogue stars are propagated with their space motion and projected with
//! `star_horizontal`. Refraction is applied on top when configured.

pub mod ephemeris;
pub mod refraction;

pub use ephemeris::{SiderustEphemeris, SUPPORTED_YEARS};
pub use refraction::Atmosphere;
