//! Continuous color ramps and palette generation.

use std::f32::consts::PI;

use log::warn;

use super::color::Color;
use crate::error::Result;

const VIRIDIS: &[&str] = &[
    "#440154", "#482777", "#3f4a8a", "#31678e", "#26838f", "#1f9d8a", "#6cce5a", "#b6de2b",
    "#fee825",
];

const SPECTRAL: &[&str] = &[
    "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4",
    "#66c2a5", "#3288bd", "#5e4fa2",
];

const GREYS: &[&str] = &[
    "#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525",
    "#000000",
];

const YLORRD: &[&str] = &[
    "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026",
    "#800026",
];

/// white -> orange -> red -> black
const DEFAULT_RAMP: &[&str] = &["#ffffff", "#f5a623", "#d0021b", "#000000"];

/// Stops sampled from the cubehelix scheme for named lookups
const CUBEHELIX_STOPS: usize = 16;

/// A piecewise-linear color ramp over `[0, 1]` with evenly spaced stops
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<Color>,
}

impl ColorScale {
    /// Ramp through `stops`; an empty list yields the default ramp
    pub fn new(stops: Vec<Color>) -> Self {
        if stops.is_empty() {
            return Self::default_ramp();
        }
        Self { stops }
    }

    /// Ramp through CSS color strings
    pub fn from_css(stops: &[impl AsRef<str>]) -> Result<Self> {
        let stops = stops
            .iter()
            .map(|s| Color::parse(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(stops))
    }

    /// The white-orange-red-black ramp used when nothing else is specified
    pub fn default_ramp() -> Self {
        Self::from_static(DEFAULT_RAMP)
    }

    /// Look up a named scale (case-insensitive).
    ///
    /// Known names: `viridis`, `spectral`, `greys`, `ylorrd`, `cubehelix` and
    /// `default`. Returns `None` for anything else.
    pub fn named(name: &str) -> Option<Self> {
        let scale = match name.trim().to_ascii_lowercase().as_str() {
            "viridis" => Self::from_static(VIRIDIS),
            "spectral" => Self::from_static(SPECTRAL),
            "greys" | "grays" => Self::from_static(GREYS),
            "ylorrd" => Self::from_static(YLORRD),
            "cubehelix" => Self::new(Cubehelix::default().colors(CUBEHELIX_STOPS)),
            "default" => Self::default_ramp(),
            _ => return None,
        };
        Some(scale)
    }

    /// Like [`ColorScale::named`], falling back to the default ramp
    pub fn named_or_default(name: &str) -> Self {
        Self::named(name).unwrap_or_else(|| {
            warn!("unknown color scale `{name}`, using the default ramp");
            Self::default_ramp()
        })
    }

    fn from_static(stops: &[&str]) -> Self {
        // the built-in tables are valid hex literals
        Self::new(stops.iter().filter_map(|s| Color::parse(s).ok()).collect())
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color at `t`, clamped into `[0, 1]`
    pub fn at(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.stops.len() - 1;
        if last == 0 {
            return self.stops[0];
        }

        let scaled = t * last as f32;
        let index = (scaled.floor() as usize).min(last - 1);
        let local = scaled - index as f32;
        self.stops[index].lerp(&self.stops[index + 1], local)
    }

    /// Color for `value` within the domain `[min, max]`
    pub fn map(&self, value: f64, min: f64, max: f64) -> Color {
        let span = max - min;
        let t = if span == 0.0 { 0.0 } else { (value - min) / span };
        self.at(t as f32)
    }

    /// `n` colors sampled evenly from the ramp, both ends included
    pub fn colors(&self, n: usize) -> Vec<Color> {
        match n {
            0 => Vec::new(),
            1 => vec![self.at(0.0)],
            _ => (0..n).map(|i| self.at(i as f32 / (n - 1) as f32)).collect(),
        }
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::default_ramp()
    }
}

/// Parameters of Green's cubehelix color scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubehelix {
    /// Starting hue in degrees
    pub start: f32,
    pub rotations: f32,
    pub hue: f32,
    pub gamma: f32,
    pub lightness: (f32, f32),
}

impl Default for Cubehelix {
    /// The scheme used for generated chromatin palettes
    fn default() -> Self {
        Self {
            start: 200.0,
            rotations: -0.8,
            hue: 1.0,
            gamma: 0.8,
            lightness: (0.3, 0.8),
        }
    }
}

impl Cubehelix {
    /// Color at fraction `f` along the helix
    pub fn at(&self, f: f32) -> Color {
        let f = f.clamp(0.0, 1.0);
        let angle = 2.0 * PI * ((self.start + 120.0) / 360.0 + self.rotations * f);
        let (lo, hi) = self.lightness;
        let l = (lo + (hi - lo) * f).powf(self.gamma);
        let amp = self.hue * l * (1.0 - l) / 2.0;
        let (sin_a, cos_a) = angle.sin_cos();

        Color::rgb(
            (l + amp * (-0.14861 * cos_a + 1.78277 * sin_a)).clamp(0.0, 1.0),
            (l + amp * (-0.29227 * cos_a - 0.90649 * sin_a)).clamp(0.0, 1.0),
            (l + amp * (1.97294 * cos_a)).clamp(0.0, 1.0),
        )
    }

    /// `n` evenly spaced colors along the helix
    pub fn colors(&self, n: usize) -> Vec<Color> {
        match n {
            0 => Vec::new(),
            1 => vec![self.at(0.0)],
            _ => (0..n).map(|i| self.at(i as f32 / (n - 1) as f32)).collect(),
        }
    }
}
