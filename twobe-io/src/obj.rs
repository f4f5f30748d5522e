//! OBJ format support

use crate::{IoError, IoResult, MeshReader};
use ::obj::raw::object::{Line, Polygon};
use ::obj::raw::{parse_obj, RawObj};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use tracing::debug;
use twobe_core::{Mesh, Point3f};

pub struct ObjReader;

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => IoError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => IoError::Io(e),
        })?;

        let mesh = read_obj(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            lines = mesh.line_count(),
            "parsed OBJ file"
        );
        Ok(mesh)
    }
}

/// Parse an OBJ document held in memory
pub fn read_obj_str(source: &str) -> IoResult<Mesh> {
    read_obj(source.as_bytes())
}

/// Parse an OBJ document from any buffered reader
pub fn read_obj<R: BufRead>(reader: R) -> IoResult<Mesh> {
    let raw = parse_obj(reader).map_err(|e| IoError::ParseError {
        message: e.to_string(),
    })?;

    let mesh = raw_to_mesh(&raw);
    mesh.validate()?;
    Ok(mesh)
}

fn raw_to_mesh(raw: &RawObj) -> Mesh {
    let vertices = raw
        .positions
        .iter()
        .map(|&(x, y, z, _)| Point3f::new(x, y, z))
        .collect();

    let mut faces = Vec::new();
    for polygon in &raw.polygons {
        let corners = polygon_positions(polygon);
        if corners.len() < 3 {
            debug!(corners = corners.len(), "skipping degenerate polygon");
            continue;
        }
        // Fan around the first corner; convex polygons come out exact.
        for i in 1..corners.len() - 1 {
            faces.push([corners[0], corners[i], corners[i + 1]]);
        }
    }

    let mut lines = Vec::new();
    for line in &raw.lines {
        let points = line_positions(line);
        lines.extend(points.windows(2).map(|pair| [pair[0], pair[1]]));
    }

    Mesh::from_parts(vertices, faces, lines)
}

fn polygon_positions(polygon: &Polygon) -> Vec<usize> {
    match polygon {
        Polygon::P(corners) => corners.clone(),
        Polygon::PT(corners) => corners.iter().map(|&(v, _)| v).collect(),
        Polygon::PN(corners) => corners.iter().map(|&(v, _)| v).collect(),
        Polygon::PTN(corners) => corners.iter().map(|&(v, _, _)| v).collect(),
    }
}

fn line_positions(line: &Line) -> Vec<usize> {
    match line {
        Line::P(points) => points.clone(),
        Line::PT(points) => points.iter().map(|&(v, _)| v).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle() {
        let mesh = read_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
        assert!(mesh.lines.is_empty());
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let source = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = read_obj_str(source).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_face_with_texture_and_normal_indices() {
        let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";
        let mesh = read_obj_str(source).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_polyline_becomes_segment_pairs() {
        let source = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nl 1 2 3 4\nl 4 1\n";
        let mesh = read_obj_str(source).unwrap();
        assert!(mesh.faces.is_empty());
        assert_eq!(mesh.lines, vec![[0, 1], [1, 2], [2, 3], [3, 0]]);
    }

    #[test]
    fn test_out_of_range_face_is_rejected() {
        let result = read_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n");
        assert!(result.is_err());
    }
}
