//! # Chromospace Prelude
//!
//! Commonly used types and functions in one import.
//!
//! ```rust
//! use chromospace::prelude::*;
//!
//! let model = Model::default();
//! assert!(get(&model, "chr1").is_none());
//! assert!(display(&init_scene()).unwrap().is_empty());
//! ```

// Data model and loader boundary
pub use crate::chromatin::{
    chunk_from_table, model_from_table, ChromatinStructure, Chunk, ColumnData, GenomicCoordinates,
    LoadOptions, Model, Part, Position, Selection, Table,
};
pub use crate::error::ChromatinError;

// Geometry and queries
pub use crate::geometry::{normalize, recenter, BoundingBox};
pub use crate::query::{coordinate_to_bin, get, get_bins_from_part, CoordinateQuery};

// Visual attributes
pub use crate::visual::{
    CategoricalColorMemo, Color, ColorConfig, MarkType, ScaleConfig, ViewConfig, VisualAttribute,
};

// Scene assembly
pub use crate::scene::{
    add_chunk_to_scene, add_model_to_scene, add_structure_to_scene, display, init_scene,
    ChromatinScene, DrawableMarkSegment,
};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3};
