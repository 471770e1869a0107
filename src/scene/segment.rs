//! # Drawable Mark Segments
//!
//! The hand-off format between scene assembly and a renderer. A segment is a
//! run of positions drawn with one mark type, plus color and size that are
//! either shared by every position or given per position (parallel arrays,
//! matched by index).

use crate::chromatin::Position;
use crate::visual::{default_color, Color, MarkType, VisualAttribute, DEFAULT_MARK_SIZE};

/// Attributes shared by all marks of a segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAttributes {
    pub color: VisualAttribute<Color>,
    pub size: VisualAttribute<f32>,
    /// Connect consecutive positions with tubes
    pub make_links: bool,
    /// Offset applied to the whole segment
    pub position: Option<Position>,
}

impl Default for SegmentAttributes {
    fn default() -> Self {
        Self {
            color: VisualAttribute::Single(default_color()),
            size: VisualAttribute::Single(DEFAULT_MARK_SIZE),
            make_links: false,
            position: None,
        }
    }
}

/// A renderable run of marks
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableMarkSegment {
    pub mark: MarkType,
    pub positions: Vec<Position>,
    pub attributes: SegmentAttributes,
}

/// Per-mark instance data
///
/// # Memory Layout
///
/// `#[repr(C)]` with only `f32` fields, so a slice of instances can be cast
/// to bytes with [`bytemuck::cast_slice`] and uploaded as an instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkInstance {
    /// World position, segment offset included
    pub position: [f32; 3],
    pub size: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl DrawableMarkSegment {
    pub fn new(mark: MarkType, positions: Vec<Position>, attributes: SegmentAttributes) -> Self {
        Self {
            mark,
            positions,
            attributes,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// One instance per position with scalar attributes broadcast and the
    /// segment offset applied.
    pub fn instances(&self) -> Vec<MarkInstance> {
        let offset = self.attributes.position.unwrap_or(Position::new(0.0, 0.0, 0.0));

        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let color = self.attributes.color.get(i).unwrap_or_else(default_color);
                let size = self.attributes.size.get(i).unwrap_or(DEFAULT_MARK_SIZE);
                let world = p + offset;
                MarkInstance {
                    position: world.into(),
                    size,
                    color: color.to_array(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(attributes: SegmentAttributes) -> DrawableMarkSegment {
        DrawableMarkSegment::new(
            MarkType::Sphere,
            vec![Position::new(0.0, 0.0, 0.0), Position::new(1.0, 2.0, 3.0)],
            attributes,
        )
    }

    #[test]
    fn test_scalar_attributes_are_broadcast() {
        let instances = segment(SegmentAttributes::default()).instances();

        assert_eq!(instances.len(), 2);
        for instance in &instances {
            assert_eq!(instance.size, DEFAULT_MARK_SIZE);
            assert_eq!(instance.color, default_color().to_array());
        }
        assert_eq!(instances[1].position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_per_element_attributes_are_matched_by_index() {
        let attributes = SegmentAttributes {
            color: VisualAttribute::PerElement(vec![Color::WHITE, Color::BLACK]),
            size: VisualAttribute::PerElement(vec![0.1, 0.2]),
            ..Default::default()
        };
        let instances = segment(attributes).instances();

        assert_eq!(instances[0].color, Color::WHITE.to_array());
        assert_eq!(instances[1].color, Color::BLACK.to_array());
        assert_eq!(instances[1].size, 0.2);
    }

    #[test]
    fn test_short_attribute_arrays_fall_back_to_defaults() {
        let attributes = SegmentAttributes {
            size: VisualAttribute::PerElement(vec![0.5]),
            ..Default::default()
        };
        let instances = segment(attributes).instances();
        assert_eq!(instances[1].size, DEFAULT_MARK_SIZE);
    }

    #[test]
    fn test_segment_offset_is_applied() {
        let attributes = SegmentAttributes {
            position: Some(Position::new(10.0, 0.0, -1.0)),
            ..Default::default()
        };
        let instances = segment(attributes).instances();
        assert_eq!(instances[0].position, [10.0, 0.0, -1.0]);
        assert_eq!(instances[1].position, [11.0, 2.0, 2.0]);
    }

    #[test]
    fn test_instances_cast_to_bytes() {
        let instances = segment(SegmentAttributes::default()).instances();
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<MarkInstance>());
        assert_eq!(std::mem::size_of::<MarkInstance>(), 32);
    }
}
