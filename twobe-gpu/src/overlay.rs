//! Screen-space overlay geometry

use bytemuck::{Pod, Zeroable};
use twobe_core::ScreenRect;

/// Vertex for flat-coloured overlay quads, position in NDC
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl OverlayVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Convert a pixel position (top-left origin) to normalized device coordinates
pub fn pixel_to_ndc(x: f32, y: f32, viewport: (u32, u32)) -> [f32; 2] {
    let (width, height) = (viewport.0.max(1) as f32, viewport.1.max(1) as f32);
    [x / width * 2.0 - 1.0, 1.0 - y / height * 2.0]
}

/// Two triangles covering `rect`
pub fn quad(rect: ScreenRect, viewport: (u32, u32), color: [f32; 3]) -> [OverlayVertex; 6] {
    let top_left = pixel_to_ndc(rect.x, rect.y, viewport);
    let bottom_right = pixel_to_ndc(rect.x + rect.width, rect.y + rect.height, viewport);
    let top_right = [bottom_right[0], top_left[1]];
    let bottom_left = [top_left[0], bottom_right[1]];

    let v = |position| OverlayVertex { position, color };
    [
        v(top_left),
        v(bottom_left),
        v(bottom_right),
        v(top_left),
        v(bottom_right),
        v(top_right),
    ]
}

/// Bordered square icon: a border-coloured quad with the fill drawn inset on top
pub fn bordered_icon(
    rect: ScreenRect,
    viewport: (u32, u32),
    fill: [f32; 3],
    border: [f32; 3],
    border_width: f32,
) -> Vec<OverlayVertex> {
    let mut vertices = Vec::with_capacity(12);
    vertices.extend_from_slice(&quad(rect, viewport, border));
    vertices.extend_from_slice(&quad(rect.inset(border_width), viewport, fill));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pixel_to_ndc_corners() {
        assert_eq!(pixel_to_ndc(0.0, 0.0, (800, 600)), [-1.0, 1.0]);
        assert_eq!(pixel_to_ndc(800.0, 600.0, (800, 600)), [1.0, -1.0]);
        assert_eq!(pixel_to_ndc(400.0, 300.0, (800, 600)), [0.0, 0.0]);
    }

    #[test]
    fn test_icon_quad_in_bottom_right() {
        let rect = ScreenRect::new(740.0, 540.0, 50.0, 50.0);
        let vertices = quad(rect, (800, 600), [1.0, 1.0, 1.0]);

        assert_relative_eq!(vertices[0].position[0], 0.85, epsilon = 1e-6);
        assert_relative_eq!(vertices[0].position[1], -0.8, epsilon = 1e-6);
        assert_relative_eq!(vertices[2].position[0], 0.975, epsilon = 1e-6);
        assert_relative_eq!(vertices[2].position[1], -0.9666667, epsilon = 1e-6);
    }

    #[test]
    fn test_bordered_icon_draws_border_first() {
        let rect = ScreenRect::new(740.0, 540.0, 50.0, 50.0);
        let vertices = bordered_icon(rect, (800, 600), [1.0, 1.0, 1.0], [0.0, 0.0, 0.0], 2.0);

        assert_eq!(vertices.len(), 12);
        assert_eq!(vertices[0].color, [0.0, 0.0, 0.0]);
        assert_eq!(vertices[6].color, [1.0, 1.0, 1.0]);
        assert!(vertices[6].position[0] > vertices[0].position[0]);
    }
}
