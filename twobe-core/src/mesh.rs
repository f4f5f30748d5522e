//! Mesh data structures and functionality

use crate::normalize::normalize;
use crate::point::*;
use crate::{Error, Result};

/// A mesh with triangular faces and independent line segments
///
/// Faces and lines index into `vertices`. Every index must be smaller than
/// the vertex count; [`Mesh::validate`] checks this.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub lines: Vec<[usize; 2]>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Create a mesh from vertices, faces and line segments
    pub fn from_parts(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>, lines: Vec<[usize; 2]>) -> Self {
        Self { vertices, faces, lines }
    }

    /// The built-in cube shown when no model is loaded
    pub fn default_cube() -> Self {
        let vertices = vec![
            Point3f::new(1.0, -1.0, -1.0),
            Point3f::new(1.0, 1.0, -1.0),
            Point3f::new(-1.0, 1.0, -1.0),
            Point3f::new(-1.0, -1.0, -1.0),
            Point3f::new(1.0, -1.0, 1.0),
            Point3f::new(1.0, 1.0, 1.0),
            Point3f::new(-1.0, -1.0, 1.0),
            Point3f::new(-1.0, 1.0, 1.0),
        ];

        let faces = vec![
            [0, 1, 2], [0, 2, 3],
            [4, 5, 6], [4, 6, 7],
            [0, 4, 7], [0, 7, 3],
            [1, 5, 6], [1, 6, 2],
            [0, 1, 5], [0, 5, 4],
            [2, 3, 7], [2, 7, 6],
        ];

        let lines = vec![
            [0, 1], [1, 2], [2, 3], [3, 0],
            [4, 5], [5, 6], [6, 7], [7, 4],
            [0, 4], [1, 5], [2, 6], [3, 7],
        ];

        Self::from_parts(vertices, faces, lines)
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of line segments
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the mesh has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || (self.faces.is_empty() && self.lines.is_empty())
    }

    /// Check that every face and line index refers to an existing vertex
    pub fn validate(&self) -> Result<()> {
        let count = self.vertices.len();

        if let Some((i, face)) = self.faces.iter().enumerate().find(|(_, f)| f.iter().any(|&v| v >= count)) {
            return Err(Error::InvalidData(format!(
                "face {} {:?} references a vertex outside 0..{}",
                i, face, count
            )));
        }

        if let Some((i, line)) = self.lines.iter().enumerate().find(|(_, l)| l.iter().any(|&v| v >= count)) {
            return Err(Error::InvalidData(format!(
                "line {} {:?} references a vertex outside 0..{}",
                i, line, count
            )));
        }

        Ok(())
    }

    /// Center and scale the vertices into a 2-unit box
    ///
    /// Returns the normalized mesh and the recommended camera distance.
    /// Faces and lines are kept as they are.
    pub fn normalized(self) -> (Self, f32) {
        let result = normalize(&self.vertices);
        let mesh = Self {
            vertices: result.vertices,
            faces: self.faces,
            lines: self.lines,
        };
        (mesh, result.camera_distance)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
