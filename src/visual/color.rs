//! RGBA colors and CSS color-string parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{ChromatinError, Result};

/// A linear RGBA color with components in `0.0..=1.0`
///
/// The `#[repr(C)]` layout matches a `vec4<f32>` so colors can be copied
/// straight into GPU instance buffers.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Build from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse a CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
    /// `rgb(r, g, b)`, `rgba(r, g, b, a)` or a named color
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        let parsed = if let Some(hex) = lower.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            args.strip_suffix(')').and_then(parse_rgb_function)
        } else {
            named_color(&lower)
        };

        parsed.ok_or_else(|| ChromatinError::InvalidColor(s.to_string()))
    }

    /// `#rrggbb` (alpha is dropped)
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation in RGB space, `t` clamped into `[0, 1]`
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl FromStr for Color {
    type Err = ChromatinError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let digits: Vec<u8> = match hex.len() {
        // shorthand: every digit is doubled
        3 | 4 => hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| (d * 17) as u8))
            .collect::<Option<_>>()?,
        6 | 8 => (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
            .collect::<Option<_>>()?,
        _ => return None,
    };

    let alpha = digits.get(3).map_or(1.0, |a| *a as f32 / 255.0);
    Some(Color::rgba(
        digits[0] as f32 / 255.0,
        digits[1] as f32 / 255.0,
        digits[2] as f32 / 255.0,
        alpha,
    ))
}

fn parse_rgb_function(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if !(parts.len() == 3 || parts.len() == 4) {
        return None;
    }

    let channel = |s: &str| {
        s.parse::<f32>()
            .ok()
            .filter(|v| (0.0..=255.0).contains(v))
            .map(|v| v / 255.0)
    };
    let alpha = match parts.get(3) {
        Some(a) => a.parse::<f32>().ok().filter(|v| (0.0..=1.0).contains(v))?,
        None => 1.0,
    };

    Some(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

fn named_color(name: &str) -> Option<Color> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        "gold" => (255, 215, 0),
        "lightgreen" => (144, 238, 144),
        "lightblue" => (173, 216, 230),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "darkgreen" => (0, 100, 0),
        "darkblue" => (0, 0, 139),
        "darkred" => (139, 0, 0),
        "darkorange" => (255, 140, 0),
        "steelblue" => (70, 130, 180),
        "skyblue" => (135, 206, 235),
        "royalblue" => (65, 105, 225),
        "slategray" | "slategrey" => (112, 128, 144),
        "salmon" => (250, 128, 114),
        "coral" => (255, 127, 80),
        "tomato" => (255, 99, 71),
        "crimson" => (220, 20, 60),
        "firebrick" => (178, 34, 34),
        "indigo" => (75, 0, 130),
        "violet" => (238, 130, 238),
        "orchid" => (218, 112, 214),
        "plum" => (221, 160, 221),
        "lavender" => (230, 230, 250),
        "turquoise" => (64, 224, 208),
        "seagreen" => (46, 139, 87),
        "forestgreen" => (34, 139, 34),
        "khaki" => (240, 230, 140),
        "beige" => (245, 245, 220),
        "tan" => (210, 180, 140),
        "chocolate" => (210, 105, 30),
        "transparent" => return Some(Color::rgba(0.0, 0.0, 0.0, 0.0)),
        _ => return None,
    };
    Some(Color::from_rgb8(r, g, b))
}
