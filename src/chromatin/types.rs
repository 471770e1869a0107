//! Core chromatin data model: bins, chunks, parts and models.

use cgmath::Vector3;

/// One 3D bin position in scene space
pub type Position = Vector3<f32>;

/// A genomic interval on a named chromosome
///
/// `start <= end` is expected but not enforced here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicCoordinates {
    pub chromosome: String,
    pub start: i64,
    pub end: i64,
}

impl GenomicCoordinates {
    pub fn new(chromosome: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
        }
    }
}

/// An ordered sequence of bins without genomic annotation
///
/// `raw_bins` keeps the positions exactly as loaded, before any centering or
/// normalization. Chunks are never mutated after creation; every transform
/// produces a new chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub bins: Vec<Position>,
    pub raw_bins: Vec<Position>,
    /// Opaque identity, only used for palette indexing by some renderers
    pub id: i32,
}

impl Chunk {
    /// Create a chunk whose raw bins are a copy of `bins`
    pub fn new(bins: Vec<Position>, id: i32) -> Self {
        Self {
            raw_bins: bins.clone(),
            bins,
            id,
        }
    }

    /// Create a chunk from processed bins and the unprocessed originals
    pub fn with_raw(bins: Vec<Position>, raw_bins: Vec<Position>, id: i32) -> Self {
        Self { bins, raw_bins, id }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// A labeled, coordinate-annotated chunk (typically one chromosome or haplotype)
///
/// `chunk.bins` spans `coordinates.start..coordinates.end` at `resolution`
/// base pairs per bin; partial first/last bins are not corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub chunk: Chunk,
    pub coordinates: GenomicCoordinates,
    /// Base pairs per bin
    pub resolution: u32,
    pub label: Option<String>,
}

impl Part {
    pub fn new(
        chunk: Chunk,
        coordinates: GenomicCoordinates,
        resolution: u32,
        label: Option<String>,
    ) -> Self {
        Self {
            chunk,
            coordinates,
            resolution,
            label,
        }
    }

    /// Number of bins in this part
    pub fn bin_count(&self) -> usize {
        self.chunk.len()
    }

    /// Whether this part carries the given label (exact, case-sensitive)
    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }
}

/// An ordered collection of parts; labels are not required to be unique
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub parts: Vec<Part>,
}

impl Model {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// Total number of bins across all parts
    pub fn bin_count(&self) -> usize {
        self.parts.iter().map(Part::bin_count).sum()
    }

    /// All bins of all parts, in part order
    pub fn flatten_bins(&self) -> Vec<Position> {
        self.parts
            .iter()
            .flat_map(|part| part.chunk.bins.iter().copied())
            .collect()
    }

    /// Labels of all parts, in order (unlabeled parts are skipped)
    pub fn labels(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| part.label.as_deref())
            .collect()
    }
}

/// A named, colored set of genomic regions highlighting part of a structure
///
/// Selections are produced alongside query results and never stored back
/// onto the model they were derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub regions: Vec<GenomicCoordinates>,
    pub color: String,
    pub label: String,
}
