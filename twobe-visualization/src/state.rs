//! Viewer state: the current mesh, the camera and the input controller

use crate::camera::{CameraState, DEFAULT_DISTANCE};
use crate::controller::{InputEvent, InteractionController, ViewerCommand};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};
use twobe_core::Mesh;
use twobe_io::IoError;

/// Why a model load did not produce a mesh
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No model selected")]
    Cancelled,

    #[error(transparent)]
    Failed(#[from] IoError),
}

/// Everything the event loop mutates between frames
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub mesh: Mesh,
    pub camera: CameraState,
    pub controller: InteractionController,
}

impl ViewerState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mesh: Mesh::default_cube(),
            camera: CameraState::default(),
            controller: InteractionController::new(width, height),
        }
    }

    /// Pick a file with `pick`, read it with `read` and apply the outcome
    pub fn load_with<P, R>(&mut self, pick: P, read: R)
    where
        P: FnOnce() -> Option<PathBuf>,
        R: FnOnce(&PathBuf) -> Result<Mesh, IoError>,
    {
        let outcome = match pick() {
            Some(path) => {
                info!("Loading model: {}", path.display());
                read(&path).map_err(LoadError::from)
            }
            None => Err(LoadError::Cancelled),
        };
        self.apply_load(outcome);
    }

    /// Replace the mesh with a loaded one, or fall back to the default cube
    ///
    /// Rotation and zoom are kept; only the base distance changes.
    pub fn apply_load(&mut self, outcome: Result<Mesh, LoadError>) {
        match outcome {
            Ok(mesh) => {
                let (mesh, distance) = mesh.normalized();
                info!(
                    vertices = mesh.vertex_count(),
                    faces = mesh.face_count(),
                    lines = mesh.line_count(),
                    camera_distance = distance,
                    "Model loaded"
                );
                self.mesh = mesh;
                self.camera.base_distance = distance;
            }
            Err(err) => {
                match &err {
                    LoadError::Cancelled => info!("No model selected, showing default cube"),
                    LoadError::Failed(cause) => warn!("Failed to load model: {}, showing default cube", cause),
                }
                self.mesh = Mesh::default_cube();
                self.camera.base_distance = DEFAULT_DISTANCE;
            }
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        self.controller.handle(event, &mut self.camera)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.controller.set_viewport(width, height);
    }

    /// Width over height of the current viewport
    pub fn aspect(&self) -> f32 {
        let (width, height) = self.controller.viewport();
        width.max(1) as f32 / height.max(1) as f32
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use twobe_core::{BoundingBox, Point2f, Point3f};

    fn triangle() -> Mesh {
        Mesh::from_parts(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(10.0, 0.0, 0.0),
                Point3f::new(0.0, 10.0, 0.0),
            ],
            vec![[0, 1, 2]],
            vec![],
        )
    }

    #[test]
    fn test_successful_load_normalizes() {
        let mut state = ViewerState::default();
        state.apply_load(Ok(triangle()));

        let bounds = BoundingBox::from_points(&state.mesh.vertices).unwrap();
        assert_relative_eq!(bounds.min, Point3f::new(-1.0, -1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.max, Point3f::new(1.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(state.camera.base_distance, 15.0);
        assert_eq!(state.mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_cancel_falls_back_to_cube() {
        let mut state = ViewerState::default();
        state.apply_load(Ok(triangle()));
        state.apply_load(Err(LoadError::Cancelled));

        assert_eq!(state.mesh, Mesh::default_cube());
        assert_relative_eq!(state.camera.base_distance, 5.0);
    }

    #[test]
    fn test_failure_falls_back_to_cube() {
        let mut state = ViewerState::default();
        state.apply_load(Ok(triangle()));
        state.apply_load(Err(LoadError::Failed(IoError::ParseError {
            message: "bad face".to_string(),
        })));

        assert_eq!(state.mesh, Mesh::default_cube());
        assert_relative_eq!(state.camera.base_distance, 5.0);
    }

    #[test]
    fn test_load_keeps_rotation_and_zoom() {
        let mut state = ViewerState::default();
        state.handle_input(InputEvent::PointerDown(Point2f::new(0.0, 0.0)));
        state.handle_input(InputEvent::PointerMove(Point2f::new(20.0, 10.0)));
        state.handle_input(InputEvent::ScrollDown);

        state.apply_load(Ok(triangle()));

        assert_relative_eq!(state.camera.rotation_x, 5.0);
        assert_relative_eq!(state.camera.rotation_y, 10.0);
        assert_relative_eq!(state.camera.zoom(), 1.1);
    }

    #[test]
    fn test_load_with_cancelled_picker() {
        let mut state = ViewerState::default();
        state.load_with(|| None, |_| panic!("reader must not run without a path"));
        assert_eq!(state.mesh, Mesh::default_cube());
    }

    #[test]
    fn test_load_with_reader_error() {
        let mut state = ViewerState::default();
        state.apply_load(Ok(triangle()));
        state.load_with(
            || Some(PathBuf::from("missing.obj")),
            |path| Err(IoError::FileNotFound { path: path.display().to_string() }),
        );
        assert_eq!(state.mesh, Mesh::default_cube());
        assert_relative_eq!(state.camera.base_distance, 5.0);
    }

    #[test]
    fn test_aspect_tracks_resize() {
        let mut state = ViewerState::default();
        state.resize(1000, 500);
        assert_relative_eq!(state.aspect(), 2.0);
    }
}
