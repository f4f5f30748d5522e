//! Camera state and the per-frame view computation

use nalgebra::{Matrix4, Perspective3, Rotation3, Vector3};

/// Degrees of rotation per pixel of drag
pub const ROTATION_SENSITIVITY: f32 = 0.5;
/// Zoom change per scroll notch
pub const ZOOM_STEP: f32 = 0.1;
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;
/// Camera distance used for the default cube
pub const DEFAULT_DISTANCE: f32 = 5.0;

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Orbit camera around the origin
///
/// Angles are accumulated degrees and never wrap. `zoom` always stays within
/// `[MIN_ZOOM, MAX_ZOOM]`; only [`CameraState::zoom_in`] and
/// [`CameraState::zoom_out`] change it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub rotation_x: f32,
    pub rotation_y: f32,
    zoom: f32,
    pub base_distance: f32,
}

impl CameraState {
    pub fn new(base_distance: f32) -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            zoom: 1.0,
            base_distance,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Apply a drag delta in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.rotation_x += dy * ROTATION_SENSITIVITY;
        self.rotation_y += dx * ROTATION_SENSITIVITY;
    }

    /// Move closer by one step
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Move away by one step
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    /// Distance from the eye to the model origin
    pub fn eye_distance(&self) -> f32 {
        self.base_distance * self.zoom
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE)
    }
}

/// Projection and view matrices for one frame, OpenGL clip conventions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub projection: Matrix4<f32>,
    pub view: Matrix4<f32>,
}

impl FrameView {
    pub fn new(camera: &CameraState, aspect: f32) -> Self {
        let projection =
            Perspective3::new(aspect, FOV_Y_DEGREES.to_radians(), NEAR_PLANE, FAR_PLANE).to_homogeneous();

        let translation = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -camera.eye_distance()));
        let rotate_x = Rotation3::from_axis_angle(&Vector3::x_axis(), camera.rotation_x.to_radians());
        let rotate_y = Rotation3::from_axis_angle(&Vector3::y_axis(), camera.rotation_y.to_radians());
        let view = translation * rotate_x.to_homogeneous() * rotate_y.to_homogeneous();

        Self { projection, view }
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view
    }
}
