//! Per-demo renderers
//!
//! Each renderer owns the meshes and bind groups for one demo and turns a
//! `Scene` into draw calls. Geometry is uploaded once and moved with the
//! transform uniform; a mesh is only rebuilt when its shape or color changes.

use glam::{Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;

use super::buffers::{BlendUniform, Mesh, Transform, transform_layout};
use super::context::GpuContext;
use super::pipelines::{BlendPipeline, CubePipeline, FlatPipeline};
use super::shapes::{self, CubeTexture};
use super::texture::{GpuTexture, repeat_sampler};
use crate::consts::*;
use crate::error::DemoError;
use crate::settings::Settings;
use crate::sim::{DemoState, Scene};

fn clear_color(c: [f64; 4]) -> wgpu::Color {
    wgpu::Color {
        r: c[0],
        g: c[1],
        b: c[2],
        a: c[3],
    }
}

fn square_color(rgb: [f32; 3]) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], 1.0]
}

/// Renderer for whichever demo is running
pub enum SceneRenderer {
    Snow(SnowRenderer),
    Cube(CubeRenderer),
    Blend(BlendRenderer),
    Square(SquareRenderer),
}

impl SceneRenderer {
    pub fn new(ctx: &GpuContext, scene: &Scene, settings: &Settings) -> Result<Self, DemoError> {
        let layout = transform_layout(&ctx.device);
        let projection = scene.projection(ctx.aspect());

        let renderer = match &scene.state {
            DemoState::Snow { flake, .. } => {
                let snow = &settings.snow;
                let pipeline = FlatPipeline::new(ctx, &layout)?;
                let box_verts =
                    shapes::rect(Vec2::ZERO, snow.box_half_width, snow.box_half_height, BOX_COLOR);
                let flake_verts =
                    shapes::circle(Vec2::ZERO, flake.radius(), FLAKE_COLOR, snow.segments);

                SceneRenderer::Snow(SnowRenderer {
                    pipeline,
                    box_mesh: Mesh::new(&ctx.device, "snow_box", &box_verts),
                    box_transform: Transform::new(&ctx.device, &layout, "box", projection),
                    flake_mesh: Mesh::new(&ctx.device, "flake", &flake_verts),
                    flake_transform: Transform::new(&ctx.device, &layout, "flake", projection),
                    flake_generation: flake.generation(),
                    segments: snow.segments,
                })
            }
            DemoState::Cube { .. } => {
                let device = &ctx.device;
                let cube = &settings.cube;
                let pipeline = CubePipeline::new(ctx, &layout)?;
                let sampler = repeat_sampler(device);
                let texture_a = GpuTexture::from_path(device, &ctx.queue, &cube.texture_a);
                let texture_b = GpuTexture::from_path(device, &ctx.queue, &cube.texture_b);
                let bind_group_a =
                    pipeline.texture_bind_group(device, "cube_a", &texture_a.view, &sampler);
                let bind_group_b =
                    pipeline.texture_bind_group(device, "cube_b", &texture_b.view, &sampler);

                SceneRenderer::Cube(CubeRenderer {
                    inside_mesh: Mesh::new(device, "cube_inside", &shapes::cube_inside()),
                    outside_a: Mesh::new(
                        device,
                        "cube_outside_a",
                        &shapes::cube_outside(CubeTexture::A),
                    ),
                    outside_b: Mesh::new(
                        device,
                        "cube_outside_b",
                        &shapes::cube_outside(CubeTexture::B),
                    ),
                    transform: Transform::new(device, &layout, "cube", projection),
                    pipeline,
                    bind_group_a,
                    bind_group_b,
                })
            }
            DemoState::Blend {
                alpha_front,
                alpha_back,
                ..
            } => {
                let device = &ctx.device;
                let blend = &settings.blend;
                let pipeline = BlendPipeline::new(ctx, &layout)?;
                let sampler = repeat_sampler(device);
                let front = GpuTexture::from_path(device, &ctx.queue, &blend.texture_front);
                let back = GpuTexture::from_path(device, &ctx.queue, &blend.texture_back);
                let params = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("blend_params"),
                    contents: bytemuck::bytes_of(&BlendUniform {
                        alpha_front: *alpha_front,
                        alpha_back: *alpha_back,
                        _pad: [0.0; 2],
                    }),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
                let bind_group =
                    pipeline.texture_bind_group(device, &front.view, &back.view, &sampler, &params);

                SceneRenderer::Blend(BlendRenderer {
                    quad: Mesh::new(device, "blend_quad", &shapes::textured_quad()),
                    transform: Transform::new(device, &layout, "blend", projection),
                    pipeline,
                    bind_group,
                })
            }
            DemoState::Square { square } => {
                let verts = shapes::quad(square.corners(), square_color(square.color));
                SceneRenderer::Square(SquareRenderer {
                    pipeline: FlatPipeline::new(ctx, &layout)?,
                    mesh: Mesh::new(&ctx.device, "hover_square", &verts),
                    transform: Transform::new(&ctx.device, &layout, "square", projection),
                    respawns: square.respawns(),
                })
            }
        };

        log::info!("Renderer ready for {} demo", scene.demo());
        Ok(renderer)
    }

    /// Update GPU buffers from the scene and draw one frame
    pub fn render(&mut self, ctx: &GpuContext, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let projection = scene.projection(ctx.aspect());

        match (self, &scene.state) {
            (SceneRenderer::Snow(r), DemoState::Snow { snow_box, flake }) => {
                if flake.generation() != r.flake_generation {
                    let verts = shapes::circle(Vec2::ZERO, flake.radius(), FLAKE_COLOR, r.segments);
                    r.flake_mesh.replace(&ctx.device, &verts);
                    r.flake_generation = flake.generation();
                }

                let box_model = Mat4::from_translation(Vec3::new(snow_box.position, 0.0, 0.0));
                let flake_model = Mat4::from_translation(Vec3::new(
                    flake.horizontal_position(),
                    flake.vertical_position(),
                    0.0,
                ));
                r.box_transform.write(&ctx.queue, projection * box_model);
                r.flake_transform.write(&ctx.queue, projection * flake_model);

                ctx.frame(clear_color(SNOW_CLEAR_COLOR), |pass| {
                    pass.set_pipeline(&r.pipeline.pipeline);
                    pass.set_bind_group(0, &r.box_transform.bind_group, &[]);
                    r.box_mesh.draw(pass);
                    pass.set_bind_group(0, &r.flake_transform.bind_group, &[]);
                    r.flake_mesh.draw(pass);
                })
            }
            (SceneRenderer::Cube(r), DemoState::Cube { spinner }) => {
                let mvp = projection * spinner.model(scene.elapsed_secs);
                r.transform.write(&ctx.queue, mvp);

                ctx.frame(clear_color(SOLID_CLEAR_COLOR), |pass| {
                    pass.set_bind_group(0, &r.transform.bind_group, &[]);

                    // Far walls first, seen from inside in flat colors
                    pass.set_pipeline(&r.pipeline.inside);
                    pass.set_bind_group(1, &r.bind_group_a, &[]);
                    r.inside_mesh.draw(pass);

                    // Near walls over them, textured
                    pass.set_pipeline(&r.pipeline.outside);
                    r.outside_a.draw(pass);
                    pass.set_bind_group(1, &r.bind_group_b, &[]);
                    r.outside_b.draw(pass);
                })
            }
            (SceneRenderer::Blend(r), DemoState::Blend { spinner, .. }) => {
                let mvp = projection * spinner.model(scene.elapsed_secs);
                r.transform.write(&ctx.queue, mvp);

                ctx.frame(clear_color(SOLID_CLEAR_COLOR), |pass| {
                    pass.set_pipeline(&r.pipeline.pipeline);
                    pass.set_bind_group(0, &r.transform.bind_group, &[]);
                    pass.set_bind_group(1, &r.bind_group, &[]);
                    r.quad.draw(pass);
                })
            }
            (SceneRenderer::Square(r), DemoState::Square { square }) => {
                if square.respawns() != r.respawns {
                    let verts = shapes::quad(square.corners(), square_color(square.color));
                    r.mesh.replace(&ctx.device, &verts);
                    r.respawns = square.respawns();
                }
                r.transform.write(&ctx.queue, projection);

                ctx.frame(clear_color(SQUARE_CLEAR_COLOR), |pass| {
                    pass.set_pipeline(&r.pipeline.pipeline);
                    pass.set_bind_group(0, &r.transform.bind_group, &[]);
                    r.mesh.draw(pass);
                })
            }
            (renderer, _) => {
                log::warn!(
                    "Renderer/scene mismatch ({} renderer, {} scene); skipping frame",
                    renderer.name(),
                    scene.demo()
                );
                Ok(())
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SceneRenderer::Snow(_) => "snow",
            SceneRenderer::Cube(_) => "cube",
            SceneRenderer::Blend(_) => "blend",
            SceneRenderer::Square(_) => "square",
        }
    }
}

/// Moving box and one falling flake
pub struct SnowRenderer {
    pipeline: FlatPipeline,
    box_mesh: Mesh,
    box_transform: Transform,
    flake_mesh: Mesh,
    flake_transform: Transform,
    /// Flake generation the mesh was built for
    flake_generation: u32,
    segments: u32,
}

/// Open cube: flat inside walls, textured outside walls
pub struct CubeRenderer {
    pipeline: CubePipeline,
    inside_mesh: Mesh,
    outside_a: Mesh,
    outside_b: Mesh,
    transform: Transform,
    bind_group_a: wgpu::BindGroup,
    bind_group_b: wgpu::BindGroup,
}

pub struct BlendRenderer {
    pipeline: BlendPipeline,
    quad: Mesh,
    transform: Transform,
    bind_group: wgpu::BindGroup,
}

/// Hover square in world space
pub struct SquareRenderer {
    pipeline: FlatPipeline,
    mesh: Mesh,
    transform: Transform,
    respawns: u32,
}
