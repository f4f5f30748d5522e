//! # TwoBe GPU
//!
//! wgpu rendering for TwoBe: unlit mesh faces and lines, the screenshot
//! icon overlay, and readback of rendered frames.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use twobe_gpu::{ModelRenderer, RenderConfig};
//! use twobe_core::Mesh;
//!
//! async fn example(window: Arc<winit::window::Window>) -> twobe_core::Result<()> {
//!     let mut renderer = ModelRenderer::new(window, RenderConfig::default()).await?;
//!     renderer.set_mesh(&Mesh::default_cube());
//!     renderer.render(None)?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod renderer;
pub mod overlay;
pub mod capture;

// Re-export commonly used items
pub use device::GpuContext;
pub use renderer::{opengl_to_wgpu_matrix, ModelRenderer, ModelVertex, RenderConfig, ViewUniform};
pub use overlay::{bordered_icon, pixel_to_ndc, quad, OverlayVertex};
pub use capture::{padded_bytes_per_row, unpack_rows, CapturedFrame};
