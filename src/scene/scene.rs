//! The scene: an ordered list of displayable entries that is copied on every
//! add, and its conversion into drawable segments.

use std::sync::Arc;

use log::debug;

use super::assembler::{
    build_displayable_chunk, build_displayable_model, build_displayable_structure,
};
use super::segment::DrawableMarkSegment;
use crate::chromatin::{ChromatinStructure, Chunk, Model};
use crate::error::Result;
use crate::visual::{CategoricalColorMemo, ViewConfig};

/// Something that can be placed in a scene
#[derive(Debug, Clone, PartialEq)]
pub enum Displayable {
    Chunk(Arc<Chunk>),
    Model(Arc<Model>),
    Structure(Arc<ChromatinStructure>),
}

/// A scene entry: the data plus how to display it
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayableStructure {
    pub structure: Displayable,
    pub view_config: ViewConfig,
}

impl DisplayableStructure {
    /// Segments for this entry, categorical colors assigned through `memo`
    pub fn build(&self, memo: &mut CategoricalColorMemo) -> Result<Vec<DrawableMarkSegment>> {
        match &self.structure {
            Displayable::Chunk(chunk) => build_displayable_chunk(chunk, &self.view_config, memo),
            Displayable::Model(model) => build_displayable_model(model, &self.view_config, memo),
            Displayable::Structure(structure) => {
                build_displayable_structure(structure, &self.view_config, memo)
            }
        }
    }
}

/// An immutable collection of displayable entries.
///
/// Adding an entry returns a new scene; entries share their data through
/// [`Arc`], so copies are cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChromatinScene {
    pub structures: Vec<DisplayableStructure>,
}

impl ChromatinScene {
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    fn with(&self, structure: Displayable, view_config: Option<ViewConfig>) -> Self {
        let mut structures = self.structures.clone();
        structures.push(DisplayableStructure {
            structure,
            view_config: view_config.unwrap_or_default(),
        });
        Self { structures }
    }
}

/// An empty scene
pub fn init_scene() -> ChromatinScene {
    ChromatinScene::default()
}

/// `scene` plus `chunk`; the default view configuration applies when none is given
pub fn add_chunk_to_scene(
    scene: &ChromatinScene,
    chunk: Chunk,
    view_config: Option<ViewConfig>,
) -> ChromatinScene {
    scene.with(Displayable::Chunk(Arc::new(chunk)), view_config)
}

/// `scene` plus `model`; the default view configuration applies when none is given
pub fn add_model_to_scene(
    scene: &ChromatinScene,
    model: Model,
    view_config: Option<ViewConfig>,
) -> ChromatinScene {
    scene.with(Displayable::Model(Arc::new(model)), view_config)
}

/// `scene` plus `structure`; the default view configuration applies when none is given
pub fn add_structure_to_scene(
    scene: &ChromatinScene,
    structure: ChromatinStructure,
    view_config: Option<ViewConfig>,
) -> ChromatinScene {
    scene.with(Displayable::Structure(Arc::new(structure)), view_config)
}

/// Build every entry of `scene` into drawable segments, in insertion order.
///
/// One categorical color memo spans the whole call, so a category keeps its
/// color across all entries. Nothing is retained between calls.
pub fn display(scene: &ChromatinScene) -> Result<Vec<DrawableMarkSegment>> {
    let mut memo = CategoricalColorMemo::new();
    let mut segments = Vec::new();

    for entry in &scene.structures {
        segments.extend(entry.build(&mut memo)?);
    }

    debug!(
        "displaying {} entries as {} segments",
        scene.len(),
        segments.len()
    );
    Ok(segments)
}
