//! Falling particle with randomized reset
//!
//! The snow flake: falls at a constant rate, and when it reaches the floor it
//! jumps back to the top with a fresh random radius and a fresh random
//! horizontal offset from its anchor (the moving box). Horizontally it is
//! wrapped, never reflected, into the anchor's window every tick.

use rand::Rng;
use rand::distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::DemoError;

/// Tunables for a falling particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Height a reset puts the particle at
    pub top: f32,
    /// Floor height; the particle resets once its bottom edge touches it
    pub floor: f32,
    /// Half-width of the horizontal window around the anchor
    pub half_width: f32,
    /// Units fallen per tick
    pub fall_rate: f32,
    /// Sideways units per tick (0 = straight down)
    pub drift: f32,
    pub initial_radius: f32,
    pub radius_min: f32,
    pub radius_max: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            top: BOX_HALF_HEIGHT,
            floor: -BOX_HALF_HEIGHT,
            half_width: BOX_HALF_WIDTH,
            fall_rate: FLAKE_FALL_RATE,
            drift: FLAKE_DRIFT,
            initial_radius: FLAKE_INITIAL_RADIUS,
            radius_min: FLAKE_RADIUS_MIN,
            radius_max: FLAKE_RADIUS_MAX,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<(), DemoError> {
        let values = [
            self.top,
            self.floor,
            self.half_width,
            self.fall_rate,
            self.drift,
            self.initial_radius,
            self.radius_min,
            self.radius_max,
        ];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(DemoError::config("particle values must be finite"));
        }
        if self.half_width <= 0.0 {
            return Err(DemoError::config("particle half_width must be positive"));
        }
        if self.fall_rate < 0.0 {
            return Err(DemoError::config("particle fall_rate must not be negative"));
        }
        if self.radius_min <= 0.0 || self.radius_min > self.radius_max {
            return Err(DemoError::config(format!(
                "particle radius range [{}, {}] is invalid",
                self.radius_min, self.radius_max
            )));
        }
        if !(self.radius_min..=self.radius_max).contains(&self.initial_radius) {
            return Err(DemoError::config(format!(
                "initial radius {} is outside [{}, {}]",
                self.initial_radius, self.radius_min, self.radius_max
            )));
        }
        if self.floor + self.radius_max >= self.top {
            return Err(DemoError::config(
                "particle top must be above floor + largest radius",
            ));
        }
        Ok(())
    }
}

/// What happened during a single `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleStep {
    Falling,
    /// Reached the floor and respawned at the top
    Reset,
}

/// Wrap `value` into the half-open window `[anchor - half_width, anchor + half_width)`.
///
/// Overshoot carries across: with anchor 0 and half-width 7, 7.5 becomes -6.5.
pub fn wrap_into(value: f32, anchor: f32, half_width: f32) -> f32 {
    let width = 2.0 * half_width;
    if width <= 0.0 {
        return anchor;
    }
    let low = anchor - half_width;
    let high = anchor + half_width;
    let wrapped = low + (value - low).rem_euclid(width);
    // Rounding can land exactly on the open upper edge
    if wrapped >= high { low } else { wrapped }
}

/// The falling snow flake
#[derive(Debug, Clone)]
pub struct FallingParticle {
    config: ParticleConfig,
    /// Height at creation or at the last reset
    origin: f32,
    /// Ticks fallen since `origin` was set
    elapsed: f32,
    x: f32,
    radius: f32,
    anchor: f32,
    generation: u32,
    radius_dist: Uniform<f32>,
    offset_dist: Uniform<f32>,
}

impl FallingParticle {
    /// Create a particle resting its top edge at `config.top`, at a random
    /// horizontal offset from `anchor`.
    pub fn new<R: Rng + ?Sized>(
        config: ParticleConfig,
        anchor: f32,
        rng: &mut R,
    ) -> Result<Self, DemoError> {
        config.validate()?;

        let radius_dist = Uniform::new_inclusive(config.radius_min, config.radius_max)
            .map_err(|e| DemoError::config(format!("radius distribution: {e}")))?;
        let offset_dist = Uniform::new(-config.half_width, config.half_width)
            .map_err(|e| DemoError::config(format!("offset distribution: {e}")))?;

        let x = wrap_into(anchor + offset_dist.sample(rng), anchor, config.half_width);

        Ok(Self {
            config,
            origin: config.top - config.initial_radius,
            elapsed: 0.0,
            x,
            radius: config.initial_radius,
            anchor,
            generation: 0,
            radius_dist,
            offset_dist,
        })
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Current height of the particle center.
    ///
    /// Computed from the fall origin rather than accumulated tick by tick, so
    /// long falls do not drift.
    #[inline]
    pub fn vertical_position(&self) -> f32 {
        self.origin - self.config.fall_rate * self.elapsed
    }

    #[inline]
    pub fn horizontal_position(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn anchor(&self) -> f32 {
        self.anchor
    }

    /// Height at or below which the particle resets
    #[inline]
    pub fn lower_bound(&self) -> f32 {
        self.config.floor + self.radius
    }

    /// Bumped on every reset; renderers rebuild the mesh when it changes
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Advance by `dt` ticks with the anchor now at `anchor`.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, anchor: f32, rng: &mut R) -> ParticleStep {
        let dt = dt.max(0.0);
        self.anchor = anchor;
        self.elapsed += dt;

        let step = if self.vertical_position() <= self.lower_bound() {
            self.reset(rng);
            ParticleStep::Reset
        } else {
            ParticleStep::Falling
        };

        self.x += self.config.drift * dt;
        self.x = wrap_into(self.x, self.anchor, self.config.half_width);

        step
    }

    /// Respawn at the top with a new radius and horizontal offset
    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.origin = self.config.top;
        self.elapsed = 0.0;
        self.radius = self.radius_dist.sample(rng);
        self.x = self.anchor + self.offset_dist.sample(rng);
        self.generation = self.generation.wrapping_add(1);

        log::debug!(
            "Flake reset #{}: radius {:.3}, x {:.3} (anchor {:.3})",
            self.generation,
            self.radius,
            self.x,
            self.anchor
        );
    }
}
