//! Interactive viewing for TwoBe
//!
//! This crate holds the camera model and input handling of the viewer,
//! together with the window loop that ties them to the GPU renderer:
//! - Orbit camera state and per-frame view/projection matrices
//! - Pointer, wheel and key handling with a drag state machine
//! - Model loading with fallback to the default cube
//! - File picker and PNG screenshots

pub mod camera;
pub mod controller;
pub mod state;
pub mod config;
pub mod dialog;
pub mod screenshot;
pub mod interactive_viewer;

pub use camera::*;
pub use controller::*;
pub use state::*;
pub use config::ViewerConfig;
pub use dialog::pick_model_file;
pub use screenshot::{default_screenshot_dir, save_screenshot, save_screenshot_now, screenshot_file_name};
pub use interactive_viewer::InteractiveViewer;
