//! Model normalization
//!
//! Maps an arbitrary vertex list into a canonical frame: centered on the
//! origin with its longest axis spanning exactly two units. Alongside the
//! vertices it recommends a camera distance sized from the unscaled extent.

use crate::bounds::BoundingBox;
use crate::point::*;

/// Side length of the box the longest axis is fitted into
pub const NORMALIZED_SPAN: f32 = 2.0;

/// Closest recommended camera distance
pub const MIN_CAMERA_DISTANCE: f32 = 5.0;

/// Camera distance per unit of unscaled extent
pub const DISTANCE_PER_EXTENT: f32 = 1.5;

/// Camera distance recommended for an empty vertex list
pub const EMPTY_CAMERA_DISTANCE: f32 = 1.0;

/// Output of [`normalize`]
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub vertices: Vec<Point3f>,
    pub camera_distance: f32,
}

/// Center and uniformly scale `vertices` into a 2-unit box
///
/// The recommended camera distance is `max(5.0, extent * 1.5)` where
/// `extent` is the longest axis of the box *before* scaling. A zero extent
/// leaves the centered vertices unscaled. An empty input is returned as is
/// with a distance of `1.0`.
pub fn normalize(vertices: &[Point3f]) -> Normalized {
    let Some(bounds) = BoundingBox::from_points(vertices) else {
        return Normalized {
            vertices: Vec::new(),
            camera_distance: EMPTY_CAMERA_DISTANCE,
        };
    };

    let center = bounds.center();
    let extent = bounds.extent();
    let scale = if extent > 0.0 { NORMALIZED_SPAN / extent } else { 1.0 };

    let vertices = vertices
        .iter()
        .map(|v| Point3f::from((v - center) * scale))
        .collect();

    Normalized {
        vertices,
        camera_distance: recommended_distance(extent),
    }
}

/// Camera distance for a model whose longest axis is `extent` long
pub fn recommended_distance(extent: f32) -> f32 {
    MIN_CAMERA_DISTANCE.max(extent * DISTANCE_PER_EXTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fixtures() -> Vec<Vec<Point3f>> {
        vec![
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(10.0, 0.0, 0.0),
                Point3f::new(0.0, 10.0, 0.0),
            ],
            vec![
                Point3f::new(-120.5, 33.0, 7.25),
                Point3f::new(-80.0, 40.0, -2.0),
                Point3f::new(-95.0, 38.5, 11.0),
                Point3f::new(-101.0, 35.0, 0.0),
            ],
            vec![
                Point3f::new(1000.0, 1000.0, 1000.0),
                Point3f::new(1000.5, 1000.0, 1000.25),
            ],
            vec![
                Point3f::new(0.1, -0.2, 0.3),
                Point3f::new(-0.4, 0.5, -0.6),
                Point3f::new(0.7, 0.8, -0.9),
            ],
        ]
    }

    #[test]
    fn test_empty_input_passes_through() {
        let result = normalize(&[]);
        assert!(result.vertices.is_empty());
        assert_eq!(result.camera_distance, 1.0);
    }

    #[test]
    fn test_normalized_box_is_centered() {
        for input in fixtures() {
            let result = normalize(&input);
            let bounds = BoundingBox::from_points(&result.vertices).unwrap();
            let center = bounds.center();
            assert_relative_eq!(center.x, 0.0, epsilon = 1e-4);
            assert_relative_eq!(center.y, 0.0, epsilon = 1e-4);
            assert_relative_eq!(center.z, 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_longest_axis_spans_two_units() {
        for input in fixtures() {
            let result = normalize(&input);
            let bounds = BoundingBox::from_points(&result.vertices).unwrap();
            assert_relative_eq!(bounds.extent(), 2.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_zero_extent_is_centered_but_not_scaled() {
        let point = Point3f::new(3.0, -7.0, 12.0);
        let result = normalize(&[point, point, point]);

        assert_eq!(result.vertices.len(), 3);
        for v in &result.vertices {
            assert_eq!(*v, Point3f::origin());
        }
        assert_eq!(result.camera_distance, 5.0);
    }

    #[test]
    fn test_end_to_end_example() {
        let input = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(10.0, 0.0, 0.0),
            Point3f::new(0.0, 10.0, 0.0),
        ];
        let result = normalize(&input);

        let bounds = BoundingBox::from_points(&result.vertices).unwrap();
        assert_relative_eq!(bounds.min.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.min.y, -1.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max.y, 1.0, epsilon = 1e-6);
        assert_eq!(bounds.min.z, 0.0);
        assert_eq!(bounds.max.z, 0.0);
        assert_relative_eq!(result.camera_distance, 15.0);
    }

    #[test]
    fn test_distance_uses_pre_scale_extent() {
        let input = vec![Point3f::new(0.0, 0.0, -20.0), Point3f::new(0.0, 0.0, 20.0)];
        let result = normalize(&input);
        assert_relative_eq!(result.camera_distance, 60.0);
    }

    #[test]
    fn test_distance_has_floor() {
        assert_eq!(recommended_distance(0.0), 5.0);
        assert_eq!(recommended_distance(2.0), 5.0);
        assert_relative_eq!(recommended_distance(10.0 / 3.0), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_distance_is_monotonic_past_floor() {
        let mut previous = recommended_distance(10.0 / 3.0);
        for step in 1..500 {
            let extent = 10.0 / 3.0 + step as f32 * 0.37;
            let distance = recommended_distance(extent);
            assert!(distance >= previous, "distance fell at extent {}", extent);
            previous = distance;
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let input = vec![
            Point3f::new(2.0, 0.0, 0.0),
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
        ];
        let result = normalize(&input);
        assert_relative_eq!(result.vertices[0].x, 1.0);
        assert_relative_eq!(result.vertices[1].x, -1.0);
        assert_relative_eq!(result.vertices[2].x, 0.0);
    }
}
