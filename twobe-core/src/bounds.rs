//! Axis-aligned bounding boxes

use crate::point::*;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3f,
    pub max: Point3f,
}

impl BoundingBox {
    /// Compute the box enclosing all points, or `None` if there are none
    pub fn from_points(points: &[Point3f]) -> Option<Self> {
        let first = *points.first()?;

        let bounds = points.iter().skip(1).fold(
            Self { min: first, max: first },
            |acc, p| Self {
                min: Point3f::new(acc.min.x.min(p.x), acc.min.y.min(p.y), acc.min.z.min(p.z)),
                max: Point3f::new(acc.max.x.max(p.x), acc.max.y.max(p.y), acc.max.z.max(p.z)),
            },
        );

        Some(bounds)
    }

    /// Midpoint of the box
    pub fn center(&self) -> Point3f {
        nalgebra::center(&self.min, &self.max)
    }

    /// Width, height and depth
    pub fn size(&self) -> Vector3f {
        self.max - self.min
    }

    /// Length of the longest axis
    pub fn extent(&self) -> f32 {
        self.size().max()
    }
}
