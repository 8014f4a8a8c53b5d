//! Vertex meshes and the per-object transform uniform

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

/// `projection * model`, column-major
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub mvp: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new(mvp: Mat4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
        }
    }
}

/// Uniform parameters for the two-texture blend shader
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BlendUniform {
    pub alpha_front: f32,
    pub alpha_back: f32,
    pub _pad: [f32; 2], // pad to 16 bytes for uniform alignment
}

// ============================================================================
// MESH
// ============================================================================

/// Immutable vertex buffer plus its vertex count
pub struct Mesh {
    buffer: wgpu::Buffer,
    count: u32,
    label: String,
}

impl Mesh {
    pub fn new<V: Pod>(device: &wgpu::Device, label: &str, vertices: &[V]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            buffer,
            count: vertices.len() as u32,
            label: label.to_string(),
        }
    }

    /// Replace the whole vertex set (the shape changed, not just moved)
    pub fn replace<V: Pod>(&mut self, device: &wgpu::Device, vertices: &[V]) {
        *self = Self::new(device, &self.label, vertices);
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.buffer.slice(..));
        render_pass.draw(0..self.count, 0..1);
    }
}

// ============================================================================
// TRANSFORM UNIFORM
// ============================================================================

/// Layout for group 0: a single vertex-stage transform uniform
pub fn transform_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("transform_bind_group_layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// One object's transform uniform buffer and bind group
pub struct Transform {
    buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl Transform {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        mvp: Mat4,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&TransformUniform::new(mvp)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, mvp: Mat4) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&TransformUniform::new(mvp)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(std::mem::size_of::<TransformUniform>(), 64);
        assert_eq!(std::mem::size_of::<BlendUniform>(), 16);
    }

    #[test]
    fn test_transform_uniform_is_column_major() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let u = TransformUniform::new(m);
        assert_eq!(u.mvp[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
