//! # Geometry Normalization
//!
//! Pure functions that move raw bin positions into a stable, comparable
//! coordinate space: centered on the origin and scaled so the largest side of
//! the bounding box is one scene unit.
//!
//! ## Key Components
//!
//! - [`BoundingBox`] - Axis-aligned bounds of a set of positions
//! - [`recenter`] - Translate positions so their bounding box is centered at the origin
//! - [`normalize`] - Scale positions by a (possibly shared) factor
//! - [`compute_model_center`] - Center of a multi-part model where every part counts once
//!
//! ## Usage
//!
//! ```rust
//! use chromospace::geometry::{normalize, recenter};
//! use cgmath::Vector3;
//!
//! let bins = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(10.0, 4.0, 2.0)];
//! let unit = normalize(&recenter(&bins), None);
//! assert!((unit[1].x - 0.5).abs() < 1e-6);
//! ```

pub mod normalize;

pub use normalize::*;

use cgmath::{Vector3, Zero};

/// Axis-aligned bounding box over a set of positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Component-wise minimum
    pub min: Vector3<f32>,
    /// Component-wise maximum
    pub max: Vector3<f32>,
}

impl BoundingBox {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Bounds of `positions`, or `None` when there are none
    pub fn from_positions(positions: &[Vector3<f32>]) -> Option<Self> {
        let (first, rest) = positions.split_first()?;

        let mut min = *first;
        let mut max = *first;

        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self::new(min, max))
    }

    /// Midpoint of the box
    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Side lengths along each axis
    pub fn sides(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Length of the longest side
    pub fn max_side(&self) -> f32 {
        let sides = self.sides();
        sides.x.max(sides.y).max(sides.z)
    }

    /// Whether the box has zero extent along every axis
    pub fn is_degenerate(&self) -> bool {
        self.sides() == Vector3::zero()
    }
}
