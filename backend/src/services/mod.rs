//! Service layer: location lookup, request handling and chart rendering.
//!
//! Services sit between the HTTP handlers and the Position Engine. They own
//! no mutable state, so one instance is shared by every request.

pub mod locations;

pub mod request;

pub mod sky_map;

pub use request::{SkyMapRequest, SkyMapService};
pub use sky_map::{
    plot_radius, render, render_objects, star_marker_size, visible_objects, RenderStyle,
};
