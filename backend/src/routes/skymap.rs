use serde::{Deserialize, Serialize};

/// A value Plotly accepts either as a scalar or as a per-point array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Marker outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLine {
    pub color: String,
    pub width: f64,
}

/// Marker appearance of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub size: OneOrMany<f64>,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFont {
    pub color: String,
}

/// One `scatterpolar` trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub name: String,
    /// Plotted radius, 90 − altitude.
    pub r: Vec<f64>,
    /// Azimuth in degrees.
    pub theta: Vec<f64>,
    pub mode: String,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textfont: Option<TextFont>,
    pub hovertext: Vec<String>,
    pub hoverinfo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialAxis {
    pub visible: bool,
    pub range: [f64; 2],
    pub showgrid: bool,
    pub showticklabels: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularAxis {
    pub direction: String,
    pub rotation: f64,
    pub showline: bool,
    pub showticklabels: bool,
    pub showgrid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarLayout {
    pub bgcolor: String,
    pub radialaxis: RadialAxis,
    pub angularaxis: AngularAxis,
}

/// Chart-wide layout and theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub polar: PolarLayout,
    pub showlegend: bool,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
}

/// Declarative chart description, directly consumable by `Plotly.react`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub data: Vec<PolarTrace>,
    pub layout: ChartLayout,
}

/// Kind of plotted object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Body,
    Star,
}

/// A rendered object, flattened for tabular consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleObject {
    pub label: String,
    pub kind: ObjectKind,
    pub altitude: qtty::Degrees,
    pub azimuth: qtty::Degrees,
    pub radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    pub marker_size: f64,
    pub color: String,
}

/// Response of the objects endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyMapResponse {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// UTC instant, `YYYY-MM-DDTHH:00Z`.
    pub time: String,
    pub objects: Vec<VisibleObject>,
    pub body_count: usize,
    pub star_count: usize,
}

/// Route function name constants
pub const GET_SKY_MAP: &str = "get_sky_map";
pub const GET_SKY_MAP_OBJECTS: &str = "get_sky_map_objects";
