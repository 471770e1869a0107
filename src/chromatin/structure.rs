//! Columnar structures handed over by loaders, and their conversion into
//! chunks and models.
//!
//! Decoders for concrete file formats live outside this crate. They deliver a
//! [`Table`] of named, equal-length columns: at least `x`, `y`, `z`, optionally
//! `chr`/`coord` for multi-chromosome models and any number of annotation
//! columns referenced by name from a view configuration.

use cgmath::Vector3;
use log::{debug, info};

use super::types::{Chunk, GenomicCoordinates, Model, Part, Position};
use crate::error::{ChromatinError, Result};
use crate::geometry::{normalize, normalize_model, recenter, recenter_model};

const X: &str = "x";
const Y: &str = "y";
const Z: &str = "z";
const CHROMOSOME: &str = "chr";
const COORDINATE: &str = "coord";

/// Processing applied to bin positions at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Translate positions so the structure is centered at the origin
    pub center: bool,
    /// Scale positions so the structure fits in a unit box
    pub normalize: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            center: true,
            normalize: true,
        }
    }
}

/// The values of one table column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            ColumnData::Text(values) => Some(values),
            ColumnData::Numeric(_) => None,
        }
    }

    /// Row value rendered as text, whatever the column kind
    fn text_at(&self, row: usize) -> Option<String> {
        match self {
            ColumnData::Numeric(values) => values.get(row).map(|v| v.to_string()),
            ColumnData::Text(values) => values.get(row).cloned(),
        }
    }

    /// Row value as an integer coordinate; text is parsed, numbers truncated
    fn coordinate_at(&self, row: usize) -> Option<i64> {
        match self {
            ColumnData::Numeric(values) => values.get(row).map(|v| *v as i64),
            ColumnData::Text(values) => values.get(row).and_then(|v| v.trim().parse().ok()),
        }
    }
}

/// An ordered set of named columns sharing one row count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<(String, ColumnData)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a column, checking its length against the table
    pub fn with_column(mut self, name: impl Into<String>, data: ColumnData) -> Result<Self> {
        self.insert_column(name, data)?;
        Ok(self)
    }

    /// Insert a column in place, replacing any existing column of that name
    pub fn insert_column(&mut self, name: impl Into<String>, data: ColumnData) -> Result<()> {
        let name = name.into();
        let expected = self.num_rows();
        let replaces_only_column =
            self.columns.len() == 1 && self.columns[0].0 == name;

        if !self.columns.is_empty() && !replaces_only_column && data.len() != expected {
            return Err(ChromatinError::ColumnLength {
                name,
                expected,
                actual: data.len(),
            });
        }

        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = data,
            None => self.columns.push((name, data)),
        }
        Ok(())
    }

    /// Row count (zero for a table without columns)
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, data)| data.len())
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data)
    }

    /// A required numeric column
    pub fn numeric_column(&self, name: &str) -> Result<&[f64]> {
        let column = self
            .column(name)
            .ok_or_else(|| ChromatinError::MissingColumn(name.to_string()))?;
        column.as_numeric().ok_or_else(|| ChromatinError::ColumnType {
            name: name.to_string(),
            expected: "numeric",
        })
    }

    /// True when the table has x, y and z columns
    pub fn has_xyz(&self) -> bool {
        [X, Y, Z].iter().all(|name| self.column(name).is_some())
    }

    /// True when the table holds nothing but x, y and z columns
    pub fn is_chunk(&self) -> bool {
        self.columns.len() == 3 && self.has_xyz()
    }

    /// Bin positions assembled from the x, y, z columns
    pub fn positions(&self) -> Result<Vec<Position>> {
        let xs = self.numeric_column(X)?;
        let ys = self.numeric_column(Y)?;
        let zs = self.numeric_column(Z)?;

        Ok(xs
            .iter()
            .zip(ys)
            .zip(zs)
            .map(|((x, y), z)| Vector3::new(*x as f32, *y as f32, *z as f32))
            .collect())
    }

    fn set_positions(&mut self, positions: &[Position]) -> Result<()> {
        self.insert_column(X, ColumnData::Numeric(positions.iter().map(|p| p.x as f64).collect()))?;
        self.insert_column(Y, ColumnData::Numeric(positions.iter().map(|p| p.y as f64).collect()))?;
        self.insert_column(Z, ColumnData::Numeric(positions.iter().map(|p| p.z as f64).collect()))
    }
}

/// A loaded chromatin structure: a table with at least x, y, z columns plus
/// descriptive metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ChromatinStructure {
    pub data: Table,
    pub name: String,
    /// Organism and genome assembly
    pub assembly: String,
}

impl ChromatinStructure {
    /// Wrap a loader table, keeping a copy of the original coordinates in
    /// `xRaw`/`yRaw`/`zRaw` and processing x, y, z per `options`
    ///
    /// # Errors
    ///
    /// Fails when any of the x, y, z columns is missing or not numeric.
    pub fn from_table(
        table: Table,
        options: LoadOptions,
        name: Option<&str>,
        assembly: Option<&str>,
    ) -> Result<Self> {
        let mut data = table;
        let raw = data.positions()?;

        for (raw_name, source) in [("xRaw", X), ("yRaw", Y), ("zRaw", Z)] {
            let column = data.numeric_column(source)?.to_vec();
            data.insert_column(raw_name, ColumnData::Numeric(column))?;
        }

        let processed = process_bins(&raw, options);
        data.set_positions(&processed)?;

        info!(
            "processed table with {} columns and {} rows",
            data.num_columns(),
            data.num_rows()
        );

        Ok(Self {
            data,
            name: name.unwrap_or("Sample Chromatin Structure").to_string(),
            assembly: assembly.unwrap_or("unknown").to_string(),
        })
    }

    pub fn num_rows(&self) -> usize {
        self.data.num_rows()
    }

    /// Current (processed) bin positions
    pub fn positions(&self) -> Result<Vec<Position>> {
        self.data.positions()
    }
}

fn process_bins(bins: &[Position], options: LoadOptions) -> Vec<Position> {
    let mut processed = bins.to_vec();
    if options.center {
        processed = recenter(&processed);
    }
    if options.normalize {
        processed = normalize(&processed, None);
    }
    processed
}

/// Turn a table into a single chunk; raw bins keep the unprocessed positions
pub fn chunk_from_table(table: &Table, options: LoadOptions) -> Result<Chunk> {
    let raw_bins = table.positions()?;
    let bins = process_bins(&raw_bins, options);
    debug!("built chunk with {} bins", bins.len());
    Ok(Chunk::with_raw(bins, raw_bins, 0))
}

/// Turn a table with `chr` and `coord` columns into a model with one part per
/// run of consecutive rows on the same chromosome
///
/// With `options.center` every part is shifted by the model center; with
/// `options.normalize` every part is scaled by one factor computed over all
/// bins, preserving the proportions between chromosomes.
pub fn model_from_table(table: &Table, options: LoadOptions) -> Result<Model> {
    let positions = table.positions()?;
    let chromosomes = table
        .column(CHROMOSOME)
        .ok_or_else(|| ChromatinError::MissingColumn(CHROMOSOME.to_string()))?;
    let coordinates = table
        .column(COORDINATE)
        .ok_or_else(|| ChromatinError::MissingColumn(COORDINATE.to_string()))?;

    let coordinate_at = |row: usize| {
        coordinates
            .coordinate_at(row)
            .ok_or_else(|| ChromatinError::ColumnType {
                name: COORDINATE.to_string(),
                expected: "integer genomic coordinates",
            })
    };

    let resolution = if positions.len() >= 2 {
        let step = coordinate_at(1)? - coordinate_at(0)?;
        u32::try_from(step).unwrap_or(1).max(1)
    } else {
        1
    };

    let mut parts: Vec<Part> = Vec::new();
    for (row, position) in positions.iter().enumerate() {
        let chromosome = chromosomes.text_at(row).unwrap_or_default();
        let coordinate = coordinate_at(row)?;

        let starts_new_part = parts
            .last()
            .map_or(true, |part| part.coordinates.chromosome != chromosome);
        if starts_new_part {
            let id = parts.len() as i32;
            parts.push(Part::new(
                Chunk::new(Vec::new(), id),
                GenomicCoordinates::new(chromosome.clone(), coordinate, coordinate),
                resolution,
                Some(chromosome),
            ));
        }

        if let Some(part) = parts.last_mut() {
            part.chunk.bins.push(*position);
            part.chunk.raw_bins.push(*position);
            part.coordinates.end = coordinate;
        }
    }

    info!(
        "built model with {} parts from {} rows at {} bp resolution",
        parts.len(),
        positions.len(),
        resolution
    );

    Ok(Model::new(parts).centered_and_normalized(options))
}

impl Model {
    /// New model with the loader processing of `options` applied
    pub fn centered_and_normalized(&self, options: LoadOptions) -> Model {
        let mut model = self.clone();
        if options.center {
            model = recenter_model(&model);
        }
        if options.normalize {
            model = normalize_model(&model);
        }
        model
    }
}
