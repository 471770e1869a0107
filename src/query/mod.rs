//! # Genomic Queries
//!
//! Resolution of genomic-coordinate strings into bin ranges, and extraction of
//! the matching sub-sequences of a [`Model`](crate::chromatin::Model).
//!
//! ## Key Components
//!
//! - [`coordinate_to_bin`] - The single place where base-pair coordinates become bin indices
//! - [`CoordinateQuery`] - Parsed form of `"chr1"` / `"chr1:10000000-12000000"`
//! - [`get`] - Find a part or a sub-range of one, together with a [`Selection`](crate::chromatin::Selection)
//! - [`get_bins_from_part`] - Index-based, clamped slicing of a part
//!
//! ## Usage
//!
//! ```rust
//! use chromospace::query::coordinate_to_bin;
//!
//! assert_eq!(coordinate_to_bin(22, 10, 0), 2);
//! assert_eq!(coordinate_to_bin(33, 10, 20), 1);
//! ```
//!
//! Queries are deterministic and keep no state between calls.

pub mod coordinates;
pub mod selection;

pub use coordinates::{coordinate_to_bin, CoordinateQuery};
pub use selection::{get, get_bins_from_part, get_region_as_part, SELECTION_COLOR};
