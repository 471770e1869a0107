// src/lib.rs
//! Chromospace
//!
//! Genomic queries, geometry normalization and visual attribute resolution
//! for 3D chromatin structures, producing renderer-agnostic mark segments.

pub mod chromatin;
pub mod error;
pub mod geometry;
pub mod prelude;
pub mod query;
pub mod scene;
pub mod visual;

// Re-export main types for convenience
pub use error::{ChromatinError, Result};
