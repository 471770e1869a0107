//! # Chromatin Data Model
//!
//! Types describing 3D chromatin structures and the boundary through which
//! loaders hand them to the rest of the pipeline.
//!
//! ## Key Components
//!
//! - [`Chunk`] - An unlabeled sequence of bin positions (plus the raw, unprocessed copy)
//! - [`Part`] - A chunk annotated with genomic coordinates, resolution and label
//! - [`Model`] - An ordered collection of parts, usually one per chromosome
//! - [`Selection`] - A highlighted set of genomic regions produced by queries
//! - [`ChromatinStructure`] - A loader table (x, y, z plus annotation columns) with metadata
//!
//! ## Lifecycle
//!
//! Chunks, parts and models are created by loaders, optionally centered and
//! normalized once at load time, and read-only afterwards. Every transform
//! returns a new value.
//!
//! ```rust
//! use chromospace::chromatin::{model_from_table, ColumnData, LoadOptions, Table};
//!
//! let table = Table::new()
//!     .with_column("chr", ColumnData::Text(vec!["chr1".into(), "chr1".into()]))?
//!     .with_column("coord", ColumnData::Numeric(vec![0.0, 1000.0]))?
//!     .with_column("x", ColumnData::Numeric(vec![0.0, 1.0]))?
//!     .with_column("y", ColumnData::Numeric(vec![0.0, 1.0]))?
//!     .with_column("z", ColumnData::Numeric(vec![0.0, 1.0]))?;
//!
//! let model = model_from_table(&table, LoadOptions::default())?;
//! assert_eq!(model.parts[0].resolution, 1000);
//! # Ok::<(), chromospace::ChromatinError>(())
//! ```

pub mod structure;
pub mod types;

pub use structure::{
    chunk_from_table, model_from_table, ChromatinStructure, ColumnData, LoadOptions, Table,
};
pub use types::{Chunk, GenomicCoordinates, Model, Part, Position, Selection};
