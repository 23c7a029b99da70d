//! Domain types shared by the Position Engine and the renderer.

pub mod observer;
pub mod sky;
pub mod time;

pub use observer::Observer;
pub use sky::{
    CatalogPosition, CelestialBody, HipparcosId, SkyPosition, StarCatalogEntry, Target,
    VisibleBody, VisibleStar,
};
pub use time::ObservationTime;
