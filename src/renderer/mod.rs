//! WebGPU rendering module
//!
//! Thin layer over wgpu: a shared context, three small pipelines (flat 2D,
//! textured cube, two-texture blend) and one renderer per demo.

pub mod buffers;
pub mod context;
pub mod pipelines;
pub mod scenes;
pub mod shapes;
pub mod texture;
pub mod vertex;

pub use context::GpuContext;
pub use scenes::SceneRenderer;
