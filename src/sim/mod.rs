//! Deterministic simulation module
//!
//! All animation logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (rates are per tick)
//! - Seeded RNG only, seeded once per scene
//! - No rendering or platform dependencies

pub mod hover;
pub mod mover;
pub mod particle;
pub mod spin;
pub mod state;
pub mod tick;

pub use hover::HoverSquare;
pub use mover::{BoundedMover, MoverStep};
pub use particle::{FallingParticle, ParticleConfig, ParticleStep, wrap_into};
pub use spin::Spinner;
pub use state::{DemoState, Scene, View};
pub use tick::{FixedStep, TickInput, tick};
