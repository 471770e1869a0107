//! Geometry of the tubes linking consecutive bins, and mark sizing.

use cgmath::{InnerSpace, Matrix4, MetricSpace, Quaternion, Vector3};

use crate::chromatin::Position;

/// Fraction of the shortest link used as sphere radius
const SPHERE_SIZE_RATIO: f32 = 0.4;

/// Placement of one link: a unit tube along +Y, rotated and stretched to span
/// two consecutive positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkTransform {
    /// Midpoint of the two endpoints
    pub position: Position,
    /// Rotation taking +Y onto the link direction
    pub rotation: Quaternion<f32>,
    /// Distance between the endpoints
    pub length: f32,
}

impl LinkTransform {
    /// Model matrix for a unit-height tube of the given `radius`
    pub fn to_matrix(&self, radius: f32) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(radius, self.length, radius)
    }
}

/// One link per consecutive pair of `positions`
pub fn compute_links(positions: &[Position]) -> Vec<LinkTransform> {
    positions
        .windows(2)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let delta = to - from;
            let length = delta.magnitude();
            let rotation = if length > 0.0 {
                Quaternion::from_arc(Vector3::unit_y(), delta / length, Some(Vector3::unit_x()))
            } else {
                Quaternion::new(1.0, 0.0, 0.0, 0.0)
            };

            LinkTransform {
                position: (from + to) / 2.0,
                rotation,
                length,
            }
        })
        .collect()
}

/// Sphere size that keeps neighbouring marks from overlapping: a fraction of
/// the shortest distance between consecutive positions. Returns `1.0` when
/// there are fewer than two positions.
pub fn estimate_best_sphere_size(positions: &[Position]) -> f32 {
    positions
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .reduce(f32::min)
        .map_or(1.0, |shortest| shortest * SPHERE_SIZE_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Rotation;

    const EPSILON: f32 = 1e-5;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < EPSILON
    }

    #[test]
    fn test_link_spans_consecutive_positions() {
        let positions = vec![
            Position::new(0.0, 0.0, 0.0),
            Position::new(2.0, 0.0, 0.0),
            Position::new(2.0, 0.0, 3.0),
        ];
        let links = compute_links(&positions);

        assert_eq!(links.len(), 2);
        assert!(close(links[0].position, Vector3::new(1.0, 0.0, 0.0)));
        assert!((links[0].length - 2.0).abs() < EPSILON);
        assert!((links[1].length - 3.0).abs() < EPSILON);

        // +Y is rotated onto each link's direction
        let dir = links[0].rotation.rotate_vector(Vector3::unit_y());
        assert!(close(dir, Vector3::unit_x()));
        let dir = links[1].rotation.rotate_vector(Vector3::unit_y());
        assert!(close(dir, Vector3::unit_z()));
    }

    #[test]
    fn test_antiparallel_link_uses_fallback_axis() {
        let links = compute_links(&[Position::new(0.0, 1.0, 0.0), Position::new(0.0, 0.0, 0.0)]);
        let dir = links[0].rotation.rotate_vector(Vector3::unit_y());
        assert!(close(dir, -Vector3::unit_y()));
    }

    #[test]
    fn test_zero_length_link_is_identity() {
        let p = Position::new(1.0, 1.0, 1.0);
        let links = compute_links(&[p, p]);
        assert_eq!(links[0].length, 0.0);
        assert_eq!(links[0].rotation, Quaternion::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_too_few_positions() {
        assert!(compute_links(&[]).is_empty());
        assert!(compute_links(&[Position::new(0.0, 0.0, 0.0)]).is_empty());
        assert_eq!(estimate_best_sphere_size(&[]), 1.0);
    }

    #[test]
    fn test_sphere_size_uses_shortest_link() {
        let positions = vec![
            Position::new(0.0, 0.0, 0.0),
            Position::new(1.0, 0.0, 0.0),
            Position::new(1.5, 0.0, 0.0),
        ];
        assert!((estimate_best_sphere_size(&positions) - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_link_matrix_maps_unit_tube_onto_link() {
        let links = compute_links(&[Position::new(0.0, 0.0, 0.0), Position::new(0.0, 0.0, 4.0)]);
        let matrix = links[0].to_matrix(0.1);

        let top = matrix * cgmath::Vector4::new(0.0, 0.5, 0.0, 1.0);
        assert!(close(top.truncate(), Vector3::new(0.0, 0.0, 4.0)));
    }
}
