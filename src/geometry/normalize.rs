//! Centering and unit-scaling of bin positions.
//!
//! All functions return freshly allocated positions; inputs are never touched.

use cgmath::{Vector3, Zero};
use log::warn;

use super::BoundingBox;
use crate::chromatin::{Chunk, Model, Part, Position};

/// Translate `positions` so that their bounding box is centered at the origin.
///
/// A single position is its own center and therefore lands on the origin.
/// An empty slice yields an empty vector.
pub fn recenter(positions: &[Position]) -> Vec<Position> {
    match BoundingBox::from_positions(positions) {
        Some(bbox) => translate(positions, -bbox.center()),
        None => Vec::new(),
    }
}

/// Factor that scales `positions` so the longest bounding box side becomes 1.
///
/// Empty input and zero-size (or non-finite) bounding boxes fall back to a
/// unit factor.
pub fn compute_normalization_factor(positions: &[Position]) -> f32 {
    let Some(bbox) = BoundingBox::from_positions(positions) else {
        return 1.0;
    };

    let max_side = bbox.max_side();
    if max_side > 0.0 && max_side.is_finite() {
        1.0 / max_side
    } else {
        warn!(
            "degenerate bounding box ({} positions, longest side {}), using unit normalization factor",
            positions.len(),
            max_side
        );
        1.0
    }
}

/// Scale every position by `factor`, or by the factor computed from the
/// positions themselves when none is given.
///
/// Passing a factor lets several parts share one scale so their relative
/// proportions survive normalization.
pub fn normalize(positions: &[Position], factor: Option<f32>) -> Vec<Position> {
    let factor = factor.unwrap_or_else(|| compute_normalization_factor(positions));
    positions.iter().map(|p| p * factor).collect()
}

/// Center of a multi-part model.
///
/// Each part contributes the center of its own bounding box, and the result is
/// the bounding box center of those per-part centers, so long parts do not
/// dominate the overall centroid. Parts without bins are skipped; a model with
/// no bins at all is centered at the origin.
pub fn compute_model_center(parts: &[Part]) -> Position {
    let part_centers: Vec<Position> = parts
        .iter()
        .filter_map(|part| BoundingBox::from_positions(&part.chunk.bins))
        .map(|bbox| bbox.center())
        .collect();

    BoundingBox::from_positions(&part_centers)
        .map(|bbox| bbox.center())
        .unwrap_or_else(Vector3::zero)
}

/// Translate every position by `offset`
pub fn translate(positions: &[Position], offset: Position) -> Vec<Position> {
    positions.iter().map(|p| p + offset).collect()
}

/// New model whose parts are all translated by minus the model center
pub fn recenter_model(model: &Model) -> Model {
    let center = compute_model_center(&model.parts);
    map_model_bins(model, |bins| translate(bins, -center))
}

/// New model scaled by one factor shared across all parts
pub fn normalize_model(model: &Model) -> Model {
    let factor = compute_normalization_factor(&model.flatten_bins());
    map_model_bins(model, |bins| normalize(bins, Some(factor)))
}

fn map_model_bins<F>(model: &Model, f: F) -> Model
where
    F: Fn(&[Position]) -> Vec<Position>,
{
    let parts = model
        .parts
        .iter()
        .map(|part| Part {
            chunk: Chunk::with_raw(
                f(&part.chunk.bins),
                part.chunk.raw_bins.clone(),
                part.chunk.id,
            ),
            ..part.clone()
        })
        .collect();

    Model::new(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromatin::GenomicCoordinates;
    use rand::Rng;

    const EPS: f32 = 1e-5;

    fn approx(a: Position, b: Position) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS && (a.z - b.z).abs() < EPS
    }

    fn part_from(bins: Vec<Position>) -> Part {
        Part::new(
            Chunk::new(bins, 0),
            GenomicCoordinates::new("chr", 0, 0),
            1,
            None,
        )
    }

    #[test]
    fn test_recenter_moves_bbox_center_to_origin() {
        let positions = vec![Vector3::new(2.0, 4.0, 6.0), Vector3::new(4.0, 8.0, 10.0)];
        let centered = recenter(&positions);

        assert!(approx(centered[0], Vector3::new(-1.0, -2.0, -2.0)));
        assert!(approx(centered[1], Vector3::new(1.0, 2.0, 2.0)));
    }

    #[test]
    fn test_recenter_degenerate_inputs() {
        assert!(recenter(&[]).is_empty());

        let single = recenter(&[Vector3::new(5.0, -3.0, 1.0)]);
        assert_eq!(single, vec![Vector3::new(0.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_recenter_is_idempotent() {
        let mut rng = rand::rng();
        let positions: Vec<Position> = (0..64)
            .map(|_| {
                Vector3::new(
                    rng.random_range(-100.0..100.0),
                    rng.random_range(-100.0..100.0),
                    rng.random_range(-100.0..100.0),
                )
            })
            .collect();

        let once = recenter(&positions);
        let twice = recenter(&once);
        for (a, b) in once.iter().zip(twice.iter()) {
            assert!((a.x - b.x).abs() < 1e-3);
            assert!((a.y - b.y).abs() < 1e-3);
            assert!((a.z - b.z).abs() < 1e-3);
        }
    }

    #[test]
    fn test_normalization_factor_uses_longest_side() {
        let positions = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(4.0, 2.0, 1.0)];
        assert!((compute_normalization_factor(&positions) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_normalized_positions_have_unit_factor() {
        let positions = vec![
            Vector3::new(-3.0, 7.0, 1.0),
            Vector3::new(12.0, -5.0, 2.0),
            Vector3::new(0.5, 0.5, 9.0),
        ];
        let normalized = normalize(&positions, None);
        assert!((compute_normalization_factor(&normalized) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_respects_supplied_factor() {
        let positions = vec![Vector3::new(1.0, 2.0, 3.0)];
        let scaled = normalize(&positions, Some(2.0));
        assert_eq!(scaled, vec![Vector3::new(2.0, 4.0, 6.0)]);
    }

    #[test]
    fn test_degenerate_factor_falls_back_to_unit() {
        let coincident = vec![Vector3::new(1.0, 1.0, 1.0); 4];
        assert_eq!(compute_normalization_factor(&coincident), 1.0);
        assert_eq!(compute_normalization_factor(&[]), 1.0);
        assert_eq!(normalize(&coincident, None), coincident);
    }

    #[test]
    fn test_model_center_weights_parts_equally() {
        // a long part around x = 0 and a one-bin part at x = 10
        let long: Vec<Position> = (0..=100)
            .map(|i| Vector3::new(-1.0 + i as f32 * 0.02, 0.0, 0.0))
            .collect();
        let parts = vec![part_from(long), part_from(vec![Vector3::new(10.0, 0.0, 0.0)])];

        let center = compute_model_center(&parts);
        assert!(approx(center, Vector3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_model_center_of_nothing_is_origin() {
        assert_eq!(compute_model_center(&[]), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(
            compute_model_center(&[part_from(Vec::new())]),
            Vector3::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_normalize_model_shares_factor_and_keeps_raw() {
        let model = Model::new(vec![
            part_from(vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)]),
            part_from(vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(4.0, 0.0, 0.0)]),
        ]);
        let normalized = normalize_model(&model);

        assert!(approx(normalized.parts[0].chunk.bins[1], Vector3::new(0.25, 0.0, 0.0)));
        assert!(approx(normalized.parts[1].chunk.bins[1], Vector3::new(1.0, 0.0, 0.0)));
        assert_eq!(normalized.parts[1].chunk.raw_bins[1], Vector3::new(4.0, 0.0, 0.0));
        // source model untouched
        assert_eq!(model.parts[1].chunk.bins[1], Vector3::new(4.0, 0.0, 0.0));
    }
}
