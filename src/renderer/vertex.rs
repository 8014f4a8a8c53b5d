//! Vertex types

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position and color (snow and square demos)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// 3D vertex with texture coordinates, a flat color, and how much of the
/// texture to show over that color (0 = flat, 1 = textured)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TexVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
    pub texture_weight: f32,
}

impl TexVertex {
    pub const fn new(
        position: [f32; 3],
        uv: [f32; 2],
        color: [f32; 4],
        texture_weight: f32,
    ) -> Self {
        Self {
            position,
            uv,
            color,
            texture_weight,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const UV_OFFSET: usize = std::mem::size_of::<[f32; 3]>();
        const COLOR_OFFSET: usize = UV_OFFSET + std::mem::size_of::<[f32; 2]>();
        const WEIGHT_OFFSET: usize = COLOR_OFFSET + std::mem::size_of::<[f32; 4]>();

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: UV_OFFSET as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: COLOR_OFFSET as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: WEIGHT_OFFSET as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Colors for demo elements
pub mod colors {
    pub const CUBE_FRONT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const CUBE_BACK: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const CUBE_LEFT: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const CUBE_RIGHT: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layouts_match_struct_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
        assert_eq!(std::mem::size_of::<TexVertex>(), 40);
        assert_eq!(TexVertex::desc().array_stride, 40);
        assert_eq!(TexVertex::desc().attributes[3].offset, 36);
    }
}
