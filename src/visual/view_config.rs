//! Declarative view configuration.
//!
//! The JSON form follows the grammar used by chromatin viewers, where `scale`
//! and `color` are either a constant or a data-driven mapping:
//!
//! ```json
//! {
//!   "mark": "sphere",
//!   "scale": { "values": [0, 50, 100], "min": 0, "max": 100, "scaleMin": 1, "scaleMax": 5 },
//!   "color": { "field": "chr", "colorScale": "spectral" },
//!   "links": true
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Mark size used when no scale is configured, in scene units
pub const DEFAULT_MARK_SIZE: f32 = 0.008;

/// Mark color used when no color is configured
pub const DEFAULT_COLOR: &str = "#6a8ed0";

/// How each bin of a structure is displayed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<MarkType>,
    /// Draw tubes between consecutive bins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<bool>,
    /// Offset of the whole structure in the scene
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
}

impl ViewConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_scale(mut self, scale: ScaleConfig) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_color(mut self, color: ColorConfig) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_mark(mut self, mark: MarkType) -> Self {
        self.mark = Some(mark);
        self
    }

    pub fn with_links(mut self, links: bool) -> Self {
        self.links = Some(links);
        self
    }

    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.position = Some(position);
        self
    }
}

/// Primitive shape drawn at every bin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    #[default]
    Sphere,
    Box,
    Octahedron,
}

/// `scale`: a constant size or a mapping from values to sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleConfig {
    Constant(f32),
    Mapped(ScaleMapping),
}

/// `color`: a constant color or a mapping from values to colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorConfig {
    Constant(String),
    Mapped(ColorMapping),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleMapping {
    #[serde(flatten)]
    pub values: AssociatedValues,
    pub scale_min: f32,
    pub scale_max: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMapping {
    #[serde(flatten)]
    pub values: AssociatedValues,
    pub color_scale: ColorScaleSpec,
}

/// The data side of a mapping: inline values or a table column, plus an
/// optional domain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociatedValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Values>,
    /// Name of a table column holding the values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl AssociatedValues {
    pub fn inline(values: Values) -> Self {
        Self {
            values: Some(values),
            ..Default::default()
        }
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// Per-bin values driving a mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Values {
    Quantitative(Vec<f64>),
    Categorical(Vec<String>),
}

impl Values {
    pub fn len(&self) -> usize {
        match self {
            Values::Quantitative(values) => values.len(),
            Values::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `colorScale`: a named ramp (`"viridis"`) or an explicit palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorScaleSpec {
    Named(String),
    Palette(Vec<String>),
}
