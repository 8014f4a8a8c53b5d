//! Time-driven rotation for the cube and blend demos

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::DemoError;

/// Constant angular speed about a fixed axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spinner {
    pub degrees_per_second: f32,
    /// Unit rotation axis
    axis: Vec3,
}

impl Spinner {
    /// `axis` does not need to be normalized, only non-zero
    pub fn new(degrees_per_second: f32, axis: Vec3) -> Result<Self, DemoError> {
        if !degrees_per_second.is_finite() || !axis.is_finite() {
            return Err(DemoError::config("spinner values must be finite"));
        }
        let axis = axis
            .try_normalize()
            .ok_or_else(|| DemoError::config("spinner axis must not be zero"))?;
        Ok(Self {
            degrees_per_second,
            axis,
        })
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn angle_degrees(&self, elapsed_secs: f32) -> f32 {
        elapsed_secs * self.degrees_per_second
    }

    /// Model matrix after `elapsed_secs`
    pub fn model(&self, elapsed_secs: f32) -> Mat4 {
        Mat4::from_axis_angle(self.axis, self.angle_degrees(elapsed_secs).to_radians())
    }
}
