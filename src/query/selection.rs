//! Structure and selection queries over a [`Model`].
//!
//! Queries never modify the model: every result is a newly allocated part
//! plus a transient [`Selection`] describing what was picked.

use log::{debug, warn};

use super::coordinates::{coordinate_to_bin, CoordinateQuery};
use crate::chromatin::{Chunk, GenomicCoordinates, Model, Part, Selection};

/// Highlight color attached to every query selection
pub const SELECTION_COLOR: &str = "#FF00FF";

/// Find the part (or sub-range of a part) described by `coordinates`.
///
/// `coordinates` is either a bare label such as `"chr1"`, returning the whole
/// first part with that label, or `"chr1:20000000-40000000"`, returning the
/// bins covering that range. Returns `None` when no part carries the label or
/// the string is malformed.
///
/// For ranges, the returned part echoes the requested start and end even when
/// the available bins cover less.
///
/// Labels need not be unique. Both forms use the first part with a matching
/// label, so a range query never slices a later duplicate, even one whose
/// bins would cover the range better.
pub fn get(model: &Model, coordinates: &str) -> Option<(Part, Selection)> {
    debug!("get with {} parts and `{}`", model.parts.len(), coordinates);

    let query = match CoordinateQuery::parse(coordinates) {
        Ok(query) => query,
        Err(err) => {
            warn!("{err}");
            return None;
        }
    };

    match &query {
        CoordinateQuery::Chromosome(label) => get_chromosome(model, label),
        CoordinateQuery::Range { label, start, end } => {
            get_chromosome_at_coordinates(model, label, *start, *end)
        }
    }
}

/// Like [`get`], discarding the selection
pub fn get_region_as_part(model: &Model, coordinates: &str) -> Option<Part> {
    get(model, coordinates).map(|(part, _)| part)
}

/// Index-based sub-slice of a part.
///
/// Both indices are clamped into `[0, bins.len() - 1]` before slicing, so an
/// out-of-range request degrades to the nearest valid sub-range.
pub fn get_bins_from_part(part: &Part, start: i64, end: i64) -> Part {
    let last = part.chunk.bins.len().saturating_sub(1);
    let start = clamp_index(start, last);
    let end = clamp_index(end, last).max(start);

    Part {
        chunk: Chunk::with_raw(
            slice_clamped(&part.chunk.bins, start, end),
            slice_clamped(&part.chunk.raw_bins, start, end),
            part.chunk.id,
        ),
        ..part.clone()
    }
}

fn get_chromosome(model: &Model, label: &str) -> Option<(Part, Selection)> {
    let part = find_part(model, label)?;

    let selection = Selection {
        regions: vec![GenomicCoordinates::new(
            label,
            part.coordinates.start,
            part.coordinates.end,
        )],
        color: SELECTION_COLOR.to_string(),
        label: label.to_string(),
    };

    Some((part.clone(), selection))
}

fn get_chromosome_at_coordinates(
    model: &Model,
    label: &str,
    start: i64,
    end: i64,
) -> Option<(Part, Selection)> {
    let part = find_part(model, label)?;

    let offset = part.coordinates.start;
    let bin_start = coordinate_to_bin(start, part.resolution, offset);
    let bin_end = coordinate_to_bin(end, part.resolution, offset);

    let bins = &part.chunk.bins;
    let raw_bins = &part.chunk.raw_bins;
    let sliced = Part::new(
        Chunk::with_raw(
            slice_range(bins, bin_start, bin_end),
            slice_range(raw_bins, bin_start, bin_end),
            -1,
        ),
        GenomicCoordinates::new(label, start, end),
        part.resolution,
        Some(label.to_string()),
    );

    let selection = Selection {
        regions: vec![sliced.coordinates.clone()],
        color: SELECTION_COLOR.to_string(),
        label: CoordinateQuery::Range {
            label: label.to_string(),
            start,
            end,
        }
        .to_string(),
    };

    Some((sliced, selection))
}

/// First part carrying `label`; later duplicates are ignored
fn find_part<'a>(model: &'a Model, label: &str) -> Option<&'a Part> {
    model.parts.iter().find(|part| part.has_label(label))
}

/// `[start, end)` with both bounds clamped into `[0, len]`
fn slice_range<T: Clone>(items: &[T], start: i64, end: i64) -> Vec<T> {
    let len = items.len();
    let start = clamp_index(start, len);
    let end = clamp_index(end, len).max(start);
    items[start..end].to_vec()
}

fn slice_clamped<T: Clone>(items: &[T], start: usize, end: usize) -> Vec<T> {
    let end = end.min(items.len());
    let start = start.min(end);
    items[start..end].to_vec()
}

fn clamp_index(index: i64, max: usize) -> usize {
    usize::try_from(index.max(0)).map_or(max, |i| i.min(max))
}
