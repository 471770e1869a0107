//! # Visual Attributes
//!
//! Turns declarative [`ViewConfig`] descriptions into concrete sizes and
//! colors for every bin.
//!
//! ## Key Components
//!
//! - [`Color`] - GPU-ready RGBA color with CSS parsing
//! - [`ColorScale`] - Named and palette-based color ramps
//! - [`ViewConfig`] - The declarative `scale` / `color` / `mark` / `links` description
//! - [`resolve_scale`] / [`resolve_color`] - Absent, constant or data-driven resolution
//! - [`CategoricalColorMemo`] - Caller-owned first-seen palette assignment
//!
//! ## Usage
//!
//! ```rust
//! use chromospace::visual::{resolve_scale, ValuesWindow, ViewConfig, VisualAttribute};
//!
//! let config = ViewConfig::from_json(
//!     r#"{"scale": {"values": [0, 50, 100], "min": 0, "max": 100, "scaleMin": 1, "scaleMax": 5}}"#,
//! )?;
//! let sizes = resolve_scale(&config, None, ValuesWindow::new(0, 3))?;
//! assert_eq!(sizes, VisualAttribute::PerElement(vec![1.0, 3.0, 5.0]));
//! # Ok::<(), chromospace::ChromatinError>(())
//! ```

pub mod color;
pub mod color_scale;
pub mod resolver;
pub mod view_config;

pub use color::Color;
pub use color_scale::{ColorScale, Cubehelix};
pub use resolver::{
    default_color, linear_remap, resolve_color, resolve_scale, CategoricalColorMemo,
    ValuesWindow, VisualAttribute,
};
pub use view_config::{
    AssociatedValues, ColorConfig, ColorMapping, ColorScaleSpec, MarkType, ScaleConfig,
    ScaleMapping, Values, ViewConfig, DEFAULT_COLOR, DEFAULT_MARK_SIZE,
};
