//! Mesh loading for TwoBe
//!
//! This crate reads Wavefront OBJ files into [`twobe_core::Mesh`]. Faces are
//! triangulated and `l` polylines become independent line segments.

pub mod obj;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::*;
pub use crate::obj::{ObjReader, read_obj_str};

use std::path::Path;
use twobe_core::Mesh;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> IoResult<Mesh>;
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match extension.as_deref() {
        Some("obj") => ObjReader::read_mesh(path),
        _ => Err(IoError::InvalidFormat {
            format: format!("Unsupported mesh format: {:?}", path.extension()),
        }),
    }
}
