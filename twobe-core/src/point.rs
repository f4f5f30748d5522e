//! Point types

use nalgebra::{Point2, Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 2D point in window pixel coordinates
pub type Point2f = Point2<f32>;
