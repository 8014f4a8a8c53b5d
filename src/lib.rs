//! gl-demos - small real-time graphics demos
//!
//! Core modules:
//! - `sim`: Deterministic animation state (movers, falling flake, spinners, hover square)
//! - `renderer`: wgpu pipelines and per-demo scene renderers
//! - `settings`: JSON-backed configuration and demo selection
//! - `error`: Crate error type

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::DemoError;
pub use settings::{Demo, Settings};

use glam::{Mat4, Vec2, Vec3};

/// Demo configuration constants
pub mod consts {
    /// Simulation ticks per second. All rates below are per tick.
    pub const TICK_HZ: f32 = 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time fed to the accumulator, in seconds
    pub const MAX_FRAME_SECS: f32 = 0.1;

    /// Default window size in pixels
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 800;

    /// Snow demo: visible world is [-10, 10] on both axes
    pub const SNOW_WORLD_HALF_EXTENT: f32 = 10.0;
    pub const BOX_HALF_WIDTH: f32 = 7.0;
    pub const BOX_HALF_HEIGHT: f32 = 3.0;
    pub const BOX_SPEED: f32 = 0.001;
    pub const BOX_COLOR: [f32; 4] = [0.0, 0.5, 1.0, 1.0];

    pub const FLAKE_FALL_RATE: f32 = 0.001;
    pub const FLAKE_DRIFT: f32 = 0.0;
    pub const FLAKE_INITIAL_RADIUS: f32 = 0.3;
    pub const FLAKE_RADIUS_MIN: f32 = 0.02;
    pub const FLAKE_RADIUS_MAX: f32 = 0.3;
    pub const FLAKE_SEGMENTS: u32 = 100;
    pub const FLAKE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SNOW_CLEAR_COLOR: [f64; 4] = [0.2, 0.2, 0.3, 1.0];

    /// Cube and blend demos: world is [-2, 2] with depth [-2, 2]
    pub const SOLID_WORLD_HALF_EXTENT: f32 = 2.0;
    pub const SOLID_DEPTH_HALF: f32 = 2.0;
    pub const CUBE_DEGREES_PER_SECOND: f32 = 190.0;
    pub const CUBE_AXIS: [f32; 3] = [1.0, 1.0, 1.0];
    pub const BLEND_DEGREES_PER_SECOND: f32 = 50.0;
    pub const BLEND_AXIS: [f32; 3] = [1.0, 0.0, 1.0];
    pub const BLEND_ALPHA_FRONT: f32 = 0.4;
    pub const BLEND_ALPHA_BACK: f32 = 0.8;
    pub const SOLID_CLEAR_COLOR: [f64; 4] = [0.2, 0.2, 0.4, 1.0];

    /// Square demo
    pub const SQUARE_WORLD_HALF_EXTENT: f32 = 10.0;
    pub const SQUARE_HALF_SIDE: f32 = 1.0;
    pub const SQUARE_START_COLOR: [f32; 3] = [0.0, 1.0, 1.0];
    pub const SQUARE_CLEAR_COLOR: [f64; 4] = [0.2, 0.2, 0.3, 1.0];
}

/// Orthographic projection for a square world window of `half_extent`,
/// widened horizontally by the window aspect ratio.
pub fn ortho_projection(half_extent: f32, depth_half: f32, aspect: f32) -> Mat4 {
    let half_width = half_extent * aspect;
    Mat4::orthographic_rh(
        -half_width,
        half_width,
        -half_extent,
        half_extent,
        -depth_half,
        depth_half,
    )
}

/// Aspect ratio of a window size, guarding against a zero height
#[inline]
pub fn aspect_ratio(size: (u32, u32)) -> f32 {
    size.0 as f32 / size.1.max(1) as f32
}

/// Convert a cursor position in window pixels (origin top-left) to world
/// coordinates by inverting `projection`.
pub fn screen_to_world(cursor: Vec2, window: (u32, u32), projection: &Mat4) -> Vec2 {
    let w = window.0.max(1) as f32;
    let h = window.1.max(1) as f32;
    let ndc = Vec3::new(2.0 * cursor.x / w - 1.0, 1.0 - 2.0 * cursor.y / h, 0.5);
    projection.inverse().project_point3(ndc).truncate()
}
