//! # Scene Assembly
//!
//! Collects chunks, models and loaded structures into an immutable scene and
//! turns them into [`DrawableMarkSegment`]s, the last step before a renderer.
//!
//! ## Key Components
//!
//! - [`ChromatinScene`] - Ordered, copy-on-add list of displayable entries
//! - [`DrawableMarkSegment`] - Mark type, positions and resolved attributes
//! - [`MarkInstance`] - Per-mark GPU instance record
//! - [`compute_links`] - Tube transforms between consecutive bins
//!
//! ## Usage
//!
//! ```rust
//! use chromospace::chromatin::{Chunk, Position};
//! use chromospace::scene::{add_chunk_to_scene, display, init_scene};
//!
//! let chunk = Chunk::new(vec![Position::new(0.0, 0.0, 0.0), Position::new(1.0, 0.0, 0.0)], 0);
//! let scene = add_chunk_to_scene(&init_scene(), chunk, None);
//!
//! let segments = display(&scene)?;
//! assert_eq!(segments[0].instances().len(), 2);
//! # Ok::<(), chromospace::ChromatinError>(())
//! ```

pub mod assembler;
pub mod links;
pub mod scene;
pub mod segment;

pub use assembler::{
    build_displayable_chunk, build_displayable_model, build_displayable_structure,
};
pub use links::{compute_links, estimate_best_sphere_size, LinkTransform};
pub use scene::{
    add_chunk_to_scene, add_model_to_scene, add_structure_to_scene, display, init_scene,
    ChromatinScene, Displayable, DisplayableStructure,
};
pub use segment::{DrawableMarkSegment, MarkInstance, SegmentAttributes};
