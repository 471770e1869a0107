//! Genomic coordinate strings and their mapping onto bin indices.

use std::fmt;

use crate::error::{ChromatinError, Result};

/// Bin index of a genomic `coordinate` for a part starting at `sequence_offset`
/// with `resolution` base pairs per bin.
///
/// Computed as `floor((coordinate - sequence_offset) / resolution)`.
/// Coordinates before the offset give negative indices; clamping is left to
/// the caller. A zero resolution is treated as one base pair per bin, and a
/// difference beyond the `i64` range saturates.
///
/// ```text
/// resolution: 10bp
/// positions: 0123456789...
/// bins:      ____0_____----1-----||||2|||||
/// coordinate_to_bin(22, 10, 0) -> 2
/// ```
pub fn coordinate_to_bin(coordinate: i64, resolution: u32, sequence_offset: i64) -> i64 {
    let resolution = i64::from(resolution.max(1));
    coordinate
        .saturating_sub(sequence_offset)
        .div_euclid(resolution)
}

/// A parsed coordinate query: `<label>` or `<label>:<start>-<end>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateQuery {
    /// A whole chromosome (or other part) by label
    Chromosome(String),
    /// A base-pair range on a labeled part
    Range { label: String, start: i64, end: i64 },
}

impl CoordinateQuery {
    /// Parse the coordinate mini-grammar.
    ///
    /// Only an outer trim is applied. The bounds must be base-10 integers.
    pub fn parse(query: &str) -> Result<Self> {
        let trimmed = query.trim();
        let malformed = |reason: &str| ChromatinError::MalformedCoordinates {
            query: query.to_string(),
            reason: reason.to_string(),
        };

        let Some((label, range)) = trimmed.split_once(':') else {
            if trimmed.is_empty() {
                return Err(malformed("empty label"));
            }
            return Ok(CoordinateQuery::Chromosome(trimmed.to_string()));
        };

        if label.is_empty() {
            return Err(malformed("empty label"));
        }
        if range.contains(':') {
            return Err(malformed("more than one `:`"));
        }

        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| malformed("expected `<start>-<end>`"))?;
        let parse_bound = |bound: &str, which: &str| {
            bound
                .parse::<i64>()
                .map_err(|err| malformed(&format!("{which} `{bound}`: {err}")))
        };

        Ok(CoordinateQuery::Range {
            label: label.to_string(),
            start: parse_bound(start, "start")?,
            end: parse_bound(end, "end")?,
        })
    }

    /// The part label this query targets
    pub fn label(&self) -> &str {
        match self {
            CoordinateQuery::Chromosome(label) => label,
            CoordinateQuery::Range { label, .. } => label,
        }
    }
}

impl fmt::Display for CoordinateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateQuery::Chromosome(label) => write!(f, "{label}"),
            CoordinateQuery::Range { label, start, end } => write!(f, "{label}:{start}-{end}"),
        }
    }
}
