//! Sky Map Renderer: visible objects → Plotly polar chart description.
//!
//! Radius is `90 − altitude` (zenith at the centre, horizon at the rim);
//! angle is azimuth, drawn clockwise with the axis rotated 180°.

use std::collections::BTreeMap;

use crate::api::{
    AngularAxis, ChartLayout, ChartSpec, Marker, MarkerLine, ObjectKind, OneOrMany, PolarLayout,
    PolarTrace, RadialAxis, TextFont, VisibleObject,
};
use crate::engine::SkyMapObjects;
use crate::models::{CelestialBody, VisibleBody, VisibleStar};

/// Marker size of every solar-system body.
pub const BODY_MARKER_SIZE: f64 = 15.0;

/// Colour used for bodies missing from the palette.
pub const DEFAULT_BODY_COLOR: &str = "lightgray";

pub const STAR_COLOR: &str = "white";
pub const STAR_OPACITY: f64 = 0.8;

const MIN_STAR_MARKER_SIZE: f64 = 0.5;
const BACKGROUND: &str = "black";

/// Marker size for a star of the given visual magnitude.
///
/// `12 · e^(−0.4·(m − 1))`, never below 0.5.
pub fn star_marker_size(magnitude: f64) -> f64 {
    (12.0 * (-0.4 * (magnitude - 1.0)).exp()).max(MIN_STAR_MARKER_SIZE)
}

/// Polar-plot radius for an altitude in degrees.
pub fn plot_radius(altitude_deg: f64) -> f64 {
    90.0 - altitude_deg
}

/// Visual settings that come from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    palette: BTreeMap<String, String>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        let palette = CelestialBody::ALL
            .iter()
            .map(|b| (b.name().to_string(), DEFAULT_BODY_COLOR.to_string()))
            .collect();
        Self { palette }
    }
}

impl RenderStyle {
    /// Default palette with the given per-name colours layered on top.
    pub fn from_palette(overrides: &BTreeMap<String, String>) -> Self {
        let mut style = Self::default();
        for (name, color) in overrides {
            style.palette.insert(name.clone(), color.clone());
        }
        style
    }

    pub fn color_for(&self, name: &str) -> &str {
        self.palette
            .get(name)
            .map(String::as_str)
            .unwrap_or(DEFAULT_BODY_COLOR)
    }
}

/// Build the chart for visible bodies and stars.
///
/// All stars share one trace; each body gets its own labelled trace drawn
/// above the stars.
pub fn render(bodies: &[VisibleBody], stars: &[VisibleStar], style: &RenderStyle) -> ChartSpec {
    let mut data = Vec::with_capacity(bodies.len() + 1);
    if !stars.is_empty() {
        data.push(star_trace(stars));
    }
    data.extend(bodies.iter().map(|b| body_trace(b, style)));
    ChartSpec {
        data,
        layout: chart_layout(),
    }
}

/// [`render`] over the Position Engine's output.
pub fn render_objects(objects: &SkyMapObjects, style: &RenderStyle) -> ChartSpec {
    render(&objects.bodies, &objects.stars, style)
}

/// Flatten engine output into rows: bodies first, then stars.
pub fn visible_objects(objects: &SkyMapObjects, style: &RenderStyle) -> Vec<VisibleObject> {
    let bodies = objects.bodies.iter().map(|b| VisibleObject {
        label: b.body.name().to_string(),
        kind: ObjectKind::Body,
        altitude: b.position.altitude,
        azimuth: b.position.azimuth,
        radius: plot_radius(b.position.altitude.value()),
        magnitude: None,
        marker_size: BODY_MARKER_SIZE,
        color: style.color_for(b.body.name()).to_string(),
    });
    let stars = objects.stars.iter().map(|s| VisibleObject {
        label: s.id.to_string(),
        kind: ObjectKind::Star,
        altitude: s.position.altitude,
        azimuth: s.position.azimuth,
        radius: plot_radius(s.position.altitude.value()),
        magnitude: Some(s.magnitude),
        marker_size: star_marker_size(s.magnitude),
        color: STAR_COLOR.to_string(),
    });
    bodies.chain(stars).collect()
}

fn star_trace(stars: &[VisibleStar]) -> PolarTrace {
    PolarTrace {
        trace_type: "scatterpolar".to_string(),
        name: "Stars".to_string(),
        r: stars
            .iter()
            .map(|s| plot_radius(s.position.altitude.value()))
            .collect(),
        theta: stars.iter().map(|s| s.position.azimuth.value()).collect(),
        mode: "markers".to_string(),
        marker: Marker {
            size: OneOrMany::Many(stars.iter().map(|s| star_marker_size(s.magnitude)).collect()),
            color: STAR_COLOR.to_string(),
            opacity: Some(STAR_OPACITY),
            line: None,
        },
        text: None,
        textposition: None,
        textfont: None,
        hovertext: stars
            .iter()
            .map(|s| format!("{} (mag {:.2})", s.id, s.magnitude))
            .collect(),
        hoverinfo: "text".to_string(),
    }
}

fn body_trace(body: &VisibleBody, style: &RenderStyle) -> PolarTrace {
    let name = body.body.name();
    PolarTrace {
        trace_type: "scatterpolar".to_string(),
        name: name.to_string(),
        r: vec![plot_radius(body.position.altitude.value())],
        theta: vec![body.position.azimuth.value()],
        mode: "markers+text".to_string(),
        marker: Marker {
            size: OneOrMany::One(BODY_MARKER_SIZE),
            color: style.color_for(name).to_string(),
            opacity: None,
            line: Some(MarkerLine {
                color: BACKGROUND.to_string(),
                width: 1.0,
            }),
        },
        text: Some(vec![name.to_string()]),
        textposition: Some("top center".to_string()),
        textfont: Some(TextFont {
            color: "white".to_string(),
        }),
        hovertext: vec![name.to_string()],
        hoverinfo: "text".to_string(),
    }
}

fn chart_layout() -> ChartLayout {
    ChartLayout {
        polar: PolarLayout {
            bgcolor: BACKGROUND.to_string(),
            radialaxis: RadialAxis {
                visible: false,
                range: [0.0, 90.0],
                showgrid: false,
                showticklabels: false,
            },
            angularaxis: AngularAxis {
                direction: "clockwise".to_string(),
                rotation: 180.0,
                showline: false,
                showticklabels: false,
                showgrid: false,
            },
        },
        showlegend: false,
        paper_bgcolor: BACKGROUND.to_string(),
        plot_bgcolor: BACKGROUND.to_string(),
    }
}
