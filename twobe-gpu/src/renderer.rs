//! Mesh renderer: unlit faces and line segments plus a screen-space icon

use crate::capture::{padded_bytes_per_row, unpack_rows, CapturedFrame};
use crate::device::GpuContext;
use crate::overlay::{bordered_icon, OverlayVertex};
use bytemuck::{Pod, Zeroable};
use nalgebra::Matrix4;
use std::sync::Arc;
use tracing::{debug, warn};
use twobe_core::{Error, Mesh, Result, ScreenRect};
use winit::window::Window;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Maps OpenGL clip space depth (-1..1) onto wgpu's 0..1
#[rustfmt::skip]
pub fn opengl_to_wgpu_matrix() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Surface formats in order of preference
///
/// Only 8-bit RGBA layouts can be read back for screenshots. Linear formats
/// come first so colours are written as given.
const SURFACE_FORMATS: [wgpu::TextureFormat; 4] = [
    wgpu::TextureFormat::Bgra8Unorm,
    wgpu::TextureFormat::Rgba8Unorm,
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

/// Pick the preferred surface format among those the adapter supports
pub fn choose_surface_format(supported: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    SURFACE_FORMATS
        .iter()
        .copied()
        .find(|format| supported.contains(format))
}

/// Vertex data for model rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
}

impl ModelVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// View uniform shared by the face and line pipelines
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct ViewUniform {
    pub view_proj: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub background_color: [f64; 4],
    pub face_color: [f32; 4],
    pub line_color: [f32; 4],
    pub icon_fill: [f32; 3],
    pub icon_border: [f32; 3],
    pub icon_border_width: f32,
    pub enable_depth_test: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: [0.1, 0.1, 0.1, 1.0],
            face_color: [1.0, 1.0, 1.0, 1.0],
            line_color: [1.0, 1.0, 1.0, 1.0],
            icon_fill: [1.0, 1.0, 1.0],
            icon_border: [0.0, 0.0, 0.0],
            icon_border_width: 2.0,
            enable_depth_test: true,
        }
    }
}

/// GPU copies of the current mesh
struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    face_indices: Option<(wgpu::Buffer, u32)>,
    line_indices: Option<(wgpu::Buffer, u32)>,
}

/// Per-view uniform buffer and its bind group
struct ViewBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    color: [f32; 4],
}

/// Renders one mesh into a window surface
pub struct ModelRenderer {
    pub gpu_context: GpuContext,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub config: RenderConfig,
    face_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    overlay_pipeline: wgpu::RenderPipeline,
    face_view: ViewBinding,
    line_view: ViewBinding,
    depth_view: wgpu::TextureView,
    mesh_buffers: Option<MeshBuffers>,
}

impl ModelRenderer {
    /// Create a renderer presenting to `window`
    pub async fn new(window: Arc<Window>, config: RenderConfig) -> Result<Self> {
        let instance = GpuContext::create_instance();
        let size = window.inner_size();

        let surface = instance
            .create_surface(window)
            .map_err(|e| Error::Gpu(format!("Failed to create surface: {:?}", e)))?;

        let gpu_context = GpuContext::new(instance, Some(&surface)).await?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        let surface_format = choose_surface_format(&surface_caps.formats)
            .ok_or_else(|| Error::Gpu(format!("No 8-bit RGBA surface format in {:?}", surface_caps.formats)))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);
        debug!(format = ?surface_format, width = surface_config.width, height = surface_config.height, "surface configured");

        let bind_group_layout = gpu_context.create_bind_group_layout(
            "view_bind_group_layout",
            &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        );

        let face_view = Self::create_view_binding(&gpu_context, &bind_group_layout, "Face", config.face_color);
        let line_view = Self::create_view_binding(&gpu_context, &bind_group_layout, "Line", config.line_color);

        let model_shader = gpu_context.create_shader_module("Model Shader", include_str!("shaders/model.wgsl"));
        let overlay_shader = gpu_context.create_shader_module("Overlay Shader", include_str!("shaders/overlay.wgsl"));

        let model_layout = gpu_context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Model Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let overlay_layout = gpu_context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Overlay Render Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let depth_compare = |compare| {
            if config.enable_depth_test {
                compare
            } else {
                wgpu::CompareFunction::Always
            }
        };

        let face_pipeline = Self::create_render_pipeline(
            &gpu_context.device,
            &model_layout,
            &model_shader,
            ModelVertex::desc(),
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            depth_compare(wgpu::CompareFunction::Less),
            config.enable_depth_test,
            "Face",
        );
        let line_pipeline = Self::create_render_pipeline(
            &gpu_context.device,
            &model_layout,
            &model_shader,
            ModelVertex::desc(),
            surface_format,
            wgpu::PrimitiveTopology::LineList,
            depth_compare(wgpu::CompareFunction::LessEqual),
            config.enable_depth_test,
            "Line",
        );
        let overlay_pipeline = Self::create_render_pipeline(
            &gpu_context.device,
            &overlay_layout,
            &overlay_shader,
            OverlayVertex::desc(),
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::CompareFunction::Always,
            false,
            "Overlay",
        );

        let depth_view = Self::create_depth_view(&gpu_context.device, surface_config.width, surface_config.height);

        Ok(Self {
            gpu_context,
            surface,
            surface_config,
            config,
            face_pipeline,
            line_pipeline,
            overlay_pipeline,
            face_view,
            line_view,
            depth_view,
            mesh_buffers: None,
        })
    }

    fn create_view_binding(
        gpu_context: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        color: [f32; 4],
    ) -> ViewBinding {
        let uniform = ViewUniform {
            view_proj: Matrix4::<f32>::identity().into(),
            color,
        };
        let buffer = gpu_context.create_buffer_init(
            &format!("{} View Buffer", label),
            &[uniform],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let bind_group = gpu_context.create_bind_group(
            &format!("{} View Bind Group", label),
            layout,
            &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        );

        ViewBinding { buffer, bind_group, color }
    }

    /// Create a render pipeline for one primitive kind
    #[allow(clippy::too_many_arguments)]
    fn create_render_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
        surface_format: wgpu::TextureFormat,
        topology: wgpu::PrimitiveTopology,
        depth_compare: wgpu::CompareFunction,
        depth_write_enabled: bool,
        label: &str,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Render Pipeline", label)),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: "vs_main",
                buffers: &[vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // OBJ winding is not reliable
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled,
                depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        })
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Current drawable size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Resize renderer surface
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.gpu_context.device, &self.surface_config);
            self.depth_view = Self::create_depth_view(&self.gpu_context.device, new_size.width, new_size.height);
        }
    }

    /// Upload a mesh, replacing whatever was drawn before
    pub fn set_mesh(&mut self, mesh: &Mesh) {
        if mesh.is_empty() {
            self.mesh_buffers = None;
            return;
        }

        let vertices: Vec<ModelVertex> = mesh
            .vertices
            .iter()
            .map(|v| ModelVertex { position: [v.x, v.y, v.z] })
            .collect();
        let vertex_buffer = self
            .gpu_context
            .create_buffer_init("Model Vertex Buffer", &vertices, wgpu::BufferUsages::VERTEX);

        let face_indices: Vec<u32> = mesh.faces.iter().flatten().map(|&i| i as u32).collect();
        let line_indices: Vec<u32> = mesh.lines.iter().flatten().map(|&i| i as u32).collect();

        self.mesh_buffers = Some(MeshBuffers {
            vertex_buffer,
            face_indices: self.create_index_buffer("Face Index Buffer", &face_indices),
            line_indices: self.create_index_buffer("Line Index Buffer", &line_indices),
        });
        debug!(vertices = vertices.len(), face_indices = face_indices.len(), line_indices = line_indices.len(), "mesh uploaded");
    }

    fn create_index_buffer(&self, label: &str, indices: &[u32]) -> Option<(wgpu::Buffer, u32)> {
        if indices.is_empty() {
            return None;
        }
        let buffer = self.gpu_context.create_buffer_init(label, indices, wgpu::BufferUsages::INDEX);
        Some((buffer, indices.len() as u32))
    }

    /// Update the combined projection-view matrix (OpenGL conventions)
    pub fn update_view(&mut self, view_proj: Matrix4<f32>) {
        let view_proj: [[f32; 4]; 4] = (opengl_to_wgpu_matrix() * view_proj).into();
        for binding in [&self.face_view, &self.line_view] {
            let uniform = ViewUniform {
                view_proj,
                color: binding.color,
            };
            self.gpu_context
                .queue
                .write_buffer(&binding.buffer, 0, bytemuck::bytes_of(&uniform));
        }
    }

    fn create_overlay_buffer(&self, icon: Option<ScreenRect>) -> Option<(wgpu::Buffer, u32)> {
        let vertices = bordered_icon(
            icon?,
            self.size(),
            self.config.icon_fill,
            self.config.icon_border,
            self.config.icon_border_width,
        );
        let buffer = self
            .gpu_context
            .create_buffer_init("Overlay Vertex Buffer", &vertices, wgpu::BufferUsages::VERTEX);
        Some((buffer, vertices.len() as u32))
    }

    fn encode_frame(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        overlay: Option<&(wgpu::Buffer, u32)>,
    ) {
        let background = self.config.background_color;
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Model Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: background[0],
                        g: background[1],
                        b: background[2],
                        a: background[3],
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Some(buffers) = &self.mesh_buffers {
            render_pass.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));

            if let Some((index_buffer, count)) = &buffers.face_indices {
                render_pass.set_pipeline(&self.face_pipeline);
                render_pass.set_bind_group(0, &self.face_view.bind_group, &[]);
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..*count, 0, 0..1);
            }

            if let Some((index_buffer, count)) = &buffers.line_indices {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_bind_group(0, &self.line_view.bind_group, &[]);
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..*count, 0, 0..1);
            }
        }

        if let Some((vertex_buffer, count)) = overlay {
            render_pass.set_pipeline(&self.overlay_pipeline);
            render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
            render_pass.draw(0..*count, 0..1);
        }
    }

    /// Render the current mesh and the icon to the window
    pub fn render(&mut self, icon: Option<ScreenRect>) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.surface.configure(&self.gpu_context.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                debug!("surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(Error::Gpu(format!("Failed to get surface texture: {:?}", e))),
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let overlay = self.create_overlay_buffer(icon);

        let mut encoder = self.gpu_context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Model Render Encoder"),
        });
        self.encode_frame(&mut encoder, &view, overlay.as_ref());

        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Render one frame offscreen and read it back
    pub fn capture(&mut self, icon: Option<ScreenRect>) -> Result<CapturedFrame> {
        let (width, height) = self.size();
        let format = self.surface_config.format;
        let device = &self.gpu_context.device;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Capture Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let padded_row = padded_bytes_per_row(width);
        let readback = self.gpu_context.create_buffer(
            "Capture Readback Buffer",
            padded_row as u64 * height as u64,
            wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        );

        let overlay = self.create_overlay_buffer(icon);
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Capture Encoder"),
        });
        self.encode_frame(&mut encoder, &view, overlay.as_ref());
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &readback,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        let (sender, receiver) = flume::bounded(1);
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = self.gpu_context.device.poll(wgpu::Maintain::Wait);

        receiver
            .recv()
            .map_err(|e| Error::Gpu(format!("Readback channel closed: {}", e)))??;

        let rgba = {
            let data = slice.get_mapped_range();
            unpack_rows(&data, width, height, padded_row, format)?
        };
        readback.unmap();

        Ok(CapturedFrame { width, height, rgba })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Perspective3, Point3};

    #[test]
    fn test_depth_correction_maps_near_and_far() {
        let projection = Perspective3::new(4.0 / 3.0, 45f32.to_radians(), 0.1, 100.0);
        let clip = opengl_to_wgpu_matrix() * projection.to_homogeneous();

        let near = clip.transform_point(&Point3::new(0.0, 0.0, -0.1));
        let far = clip.transform_point(&Point3::new(0.0, 0.0, -100.0));

        assert_relative_eq!(near.z, 0.0, epsilon = 1e-4);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_surface_format_prefers_linear_8bit() {
        use wgpu::TextureFormat::*;

        assert_eq!(choose_surface_format(&[Rgba16Float, Bgra8UnormSrgb, Bgra8Unorm]), Some(Bgra8Unorm));
        assert_eq!(choose_surface_format(&[Rgba16Float, Rgb10a2Unorm, Rgba8UnormSrgb]), Some(Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&[Rgba16Float, Rgb10a2Unorm]), None);
    }

    #[test]
    fn test_chosen_formats_can_be_captured() {
        for format in SURFACE_FORMATS {
            let padded = padded_bytes_per_row(1);
            let data = vec![0u8; padded as usize];
            assert!(unpack_rows(&data, 1, 1, padded, format).is_ok());
        }
    }

    #[test]
    fn test_vertex_layouts() {
        assert_eq!(std::mem::size_of::<ModelVertex>(), 12);
        assert_eq!(std::mem::size_of::<ViewUniform>(), 80);
        assert_eq!(ModelVertex::desc().array_stride, 12);
    }

    #[test]
    fn test_default_config_matches_viewer_palette() {
        let config = RenderConfig::default();
        assert_eq!(config.background_color, [0.1, 0.1, 0.1, 1.0]);
        assert_eq!(config.face_color, [1.0; 4]);
        assert_eq!(config.icon_border, [0.0; 3]);
        assert!(config.enable_depth_test);
    }
}
