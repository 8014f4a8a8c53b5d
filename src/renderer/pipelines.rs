//! Render pipelines for the flat, cube and blend shaders

use super::context::{GpuContext, validated};
use super::vertex::{TexVertex, Vertex};
use crate::error::DemoError;

/// Everything that differs between the demo pipelines
struct PipelineDesc<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    blend: Option<wgpu::BlendState>,
    cull_mode: Option<wgpu::Face>,
}

fn build_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    desc: PipelineDesc<'_>,
) -> Result<wgpu::RenderPipeline, DemoError> {
    let (pipeline, error) = validated(device, || {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: desc.bind_group_layouts,
            immediate_size: 0,
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: desc.shader,
                entry_point: Some("vs_main"),
                buffers: &[desc.vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: desc.shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: desc.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: desc.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    });

    match error {
        Some(error) => Err(DemoError::Pipeline {
            label: desc.label.to_string(),
            log: error.to_string(),
        }),
        None => Ok(pipeline),
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// 2D flat-colored triangles with alpha blending
pub struct FlatPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl FlatPipeline {
    pub fn new(
        ctx: &GpuContext,
        transform_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, DemoError> {
        let shader = ctx.shader("flat_shader", include_str!("flat.wgsl"))?;
        let pipeline = build_pipeline(
            &ctx.device,
            ctx.format(),
            PipelineDesc {
                label: "flat_pipeline",
                shader: &shader,
                bind_group_layouts: &[transform_layout],
                vertex_layout: Vertex::desc(),
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                cull_mode: None,
            },
        )?;
        Ok(Self { pipeline })
    }
}

/// Cube faces drawn in two passes without a depth buffer: `inside` keeps
/// only back-facing triangles (far walls seen from within), `outside` keeps
/// only front-facing ones. For a convex open tube drawing inside before
/// outside resolves every overlap.
pub struct CubePipeline {
    pub inside: wgpu::RenderPipeline,
    pub outside: wgpu::RenderPipeline,
    pub texture_layout: wgpu::BindGroupLayout,
}

impl CubePipeline {
    pub fn new(
        ctx: &GpuContext,
        transform_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, DemoError> {
        let shader = ctx.shader("cube_shader", include_str!("cube.wgsl"))?;
        let texture_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("cube_texture_layout"),
                entries: &[texture_entry(0), sampler_entry(1)],
            });

        let layouts = [transform_layout, &texture_layout];
        let inside = build_pipeline(
            &ctx.device,
            ctx.format(),
            PipelineDesc {
                label: "cube_inside_pipeline",
                shader: &shader,
                bind_group_layouts: &layouts,
                vertex_layout: TexVertex::desc(),
                blend: Some(wgpu::BlendState::REPLACE),
                cull_mode: Some(wgpu::Face::Front),
            },
        )?;
        let outside = build_pipeline(
            &ctx.device,
            ctx.format(),
            PipelineDesc {
                label: "cube_outside_pipeline",
                shader: &shader,
                bind_group_layouts: &layouts,
                vertex_layout: TexVertex::desc(),
                blend: Some(wgpu::BlendState::REPLACE),
                cull_mode: Some(wgpu::Face::Back),
            },
        )?;

        Ok(Self {
            inside,
            outside,
            texture_layout,
        })
    }

    pub fn texture_bind_group(
        &self,
        device: &wgpu::Device,
        label: &str,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}

/// Two alpha-weighted textures on one quad, alpha-blended over the clear color
pub struct BlendPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub texture_layout: wgpu::BindGroupLayout,
}

impl BlendPipeline {
    pub fn new(
        ctx: &GpuContext,
        transform_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, DemoError> {
        let shader = ctx.shader("blend_shader", include_str!("blend.wgsl"))?;
        let texture_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("blend_texture_layout"),
                entries: &[
                    texture_entry(0),
                    texture_entry(1),
                    sampler_entry(2),
                    wgpu::BindGroupLayoutEntry {
                        binding: 3,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let pipeline = build_pipeline(
            &ctx.device,
            ctx.format(),
            PipelineDesc {
                label: "blend_pipeline",
                shader: &shader,
                bind_group_layouts: &[transform_layout, &texture_layout],
                vertex_layout: TexVertex::desc(),
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                cull_mode: None,
            },
        )?;

        Ok(Self {
            pipeline,
            texture_layout,
        })
    }

    pub fn texture_bind_group(
        &self,
        device: &wgpu::Device,
        front: &wgpu::TextureView,
        back: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        params: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blend_bind_group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(front),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(back),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: params.as_entire_binding(),
                },
            ],
        })
    }
}
