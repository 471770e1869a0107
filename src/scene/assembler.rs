//! Assembly of chunks, models and structures into drawable segments.
//!
//! Assembly resolves visual attributes and packages them with positions; it
//! never renders.

use log::debug;

use super::segment::{DrawableMarkSegment, SegmentAttributes};
use crate::chromatin::{ChromatinStructure, Chunk, Model, Position, Table};
use crate::error::Result;
use crate::visual::{resolve_color, resolve_scale, CategoricalColorMemo, ValuesWindow, ViewConfig};

/// Build the single segment of an unannotated chunk. Links are drawn unless
/// the configuration turns them off.
pub fn build_displayable_chunk(
    chunk: &Chunk,
    view_config: &ViewConfig,
    memo: &mut CategoricalColorMemo,
) -> Result<Vec<DrawableMarkSegment>> {
    let window = ValuesWindow::new(0, chunk.len());
    let segment = build_segment(
        chunk.bins.clone(),
        view_config,
        None,
        window,
        memo,
        view_config.links.unwrap_or(true),
    )?;
    Ok(vec![segment])
}

/// Build one segment per part.
///
/// Data-driven values span the whole model: each part consumes the next
/// `bin_count` entries, and all parts share `memo` so a category colors the
/// same in every part.
pub fn build_displayable_model(
    model: &Model,
    view_config: &ViewConfig,
    memo: &mut CategoricalColorMemo,
) -> Result<Vec<DrawableMarkSegment>> {
    let make_links = view_config.links.unwrap_or(false);
    let mut window = ValuesWindow::new(0, 0);
    let mut segments = Vec::with_capacity(model.parts.len());

    for part in &model.parts {
        window = window.advance(part.bin_count());
        segments.push(build_segment(
            part.chunk.bins.clone(),
            view_config,
            None,
            window,
            memo,
            make_links,
        )?);
    }

    debug!(
        "built {} segments for a model of {} bins",
        segments.len(),
        model.bin_count()
    );
    Ok(segments)
}

/// Build the segment of a loaded structure. Positions come from its x/y/z
/// columns; `field` references resolve against the structure's table.
pub fn build_displayable_structure(
    structure: &ChromatinStructure,
    view_config: &ViewConfig,
    memo: &mut CategoricalColorMemo,
) -> Result<Vec<DrawableMarkSegment>> {
    let positions = structure.positions()?;
    let window = ValuesWindow::new(0, positions.len());
    let segment = build_segment(
        positions,
        view_config,
        Some(&structure.data),
        window,
        memo,
        view_config.links.unwrap_or(false),
    )?;

    debug!(
        "built structure `{}` with {} bins",
        structure.name,
        segment.len()
    );
    Ok(vec![segment])
}

fn build_segment(
    positions: Vec<Position>,
    view_config: &ViewConfig,
    table: Option<&Table>,
    window: ValuesWindow,
    memo: &mut CategoricalColorMemo,
    make_links: bool,
) -> Result<DrawableMarkSegment> {
    let attributes = SegmentAttributes {
        color: resolve_color(view_config, table, window, memo)?,
        size: resolve_scale(view_config, table, window)?,
        make_links,
        position: view_config.position.map(Position::from),
    };

    Ok(DrawableMarkSegment::new(
        view_config.mark.unwrap_or_default(),
        positions,
        attributes,
    ))
}
