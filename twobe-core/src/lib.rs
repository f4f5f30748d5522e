//! Core data structures for TwoBe
//!
//! This crate provides the mesh type shared by the loader, the renderer and
//! the viewer, together with the model normalization step that maps any mesh
//! into a canonical, framed size.

pub mod point;
pub mod mesh;
pub mod bounds;
pub mod normalize;
pub mod rect;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use bounds::*;
pub use normalize::*;
pub use rect::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector3, Matrix4};
