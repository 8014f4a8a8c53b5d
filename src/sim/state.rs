//! Scene state for each demo
//!
//! One `Scene` holds everything a demo mutates per tick, plus the single
//! seeded RNG all of its randomness comes from.

use glam::{Mat4, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::hover::HoverSquare;
use super::mover::BoundedMover;
use super::particle::FallingParticle;
use super::spin::Spinner;
use crate::consts::*;
use crate::error::DemoError;
use crate::ortho_projection;
use crate::settings::{Demo, Settings};

/// World window a demo is drawn in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub half_extent: f32,
    pub depth_half: f32,
}

impl View {
    pub fn projection(&self, aspect: f32) -> Mat4 {
        ortho_projection(self.half_extent, self.depth_half, aspect)
    }
}

/// Per-demo animated entities
#[derive(Debug, Clone)]
pub enum DemoState {
    Snow {
        snow_box: BoundedMover,
        flake: FallingParticle,
    },
    Cube {
        spinner: Spinner,
    },
    Blend {
        spinner: Spinner,
        alpha_front: f32,
        alpha_back: f32,
    },
    Square {
        square: HoverSquare,
    },
}

/// Complete scene state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct Scene {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds
    pub elapsed_secs: f32,
    pub view: View,
    pub state: DemoState,
    pub(crate) seconds_per_tick: f32,
    pub(crate) rng: Pcg32,
}

impl Scene {
    /// Build the scene for `demo`. The RNG is seeded once here and never
    /// reseeded.
    pub fn new(demo: Demo, settings: &Settings, seed: u64) -> Result<Self, DemoError> {
        settings.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let (view, state) = match demo {
            Demo::Snow => {
                let snow = &settings.snow;
                let snow_box = BoundedMover::new(
                    0.0,
                    snow.box_speed,
                    -snow.world_half_extent,
                    snow.world_half_extent,
                    snow.box_half_width,
                )?;
                let flake =
                    FallingParticle::new(snow.particle_config(), snow_box.position, &mut rng)?;
                (
                    View {
                        half_extent: snow.world_half_extent,
                        depth_half: 1.0,
                    },
                    DemoState::Snow { snow_box, flake },
                )
            }
            Demo::Cube => {
                let cube = &settings.cube;
                let spinner = Spinner::new(cube.degrees_per_second, Vec3::from(cube.axis))?;
                (solid_view(), DemoState::Cube { spinner })
            }
            Demo::Blend => {
                let blend = &settings.blend;
                let spinner = Spinner::new(blend.degrees_per_second, Vec3::from(blend.axis))?;
                (
                    solid_view(),
                    DemoState::Blend {
                        spinner,
                        alpha_front: blend.alpha_front,
                        alpha_back: blend.alpha_back,
                    },
                )
            }
            Demo::Square => {
                let sq = &settings.square;
                let square = HoverSquare::new(sq.half_side, sq.world_half_extent, &mut rng)?;
                (
                    View {
                        half_extent: sq.world_half_extent,
                        depth_half: 1.0,
                    },
                    DemoState::Square { square },
                )
            }
        };

        Ok(Self {
            seed,
            time_ticks: 0,
            elapsed_secs: 0.0,
            view,
            state,
            seconds_per_tick: settings.seconds_per_tick(),
            rng,
        })
    }

    pub fn demo(&self) -> Demo {
        match self.state {
            DemoState::Snow { .. } => Demo::Snow,
            DemoState::Cube { .. } => Demo::Cube,
            DemoState::Blend { .. } => Demo::Blend,
            DemoState::Square { .. } => Demo::Square,
        }
    }

    /// Projection for a window with the given aspect ratio
    pub fn projection(&self, aspect: f32) -> Mat4 {
        self.view.projection(aspect)
    }
}

fn solid_view() -> View {
    View {
        half_extent: SOLID_WORLD_HALF_EXTENT,
        depth_half: SOLID_DEPTH_HALF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scene_per_demo() {
        let settings = Settings::default();
        for demo in Demo::ALL {
            let scene = Scene::new(demo, &settings, 1).unwrap();
            assert_eq!(scene.demo(), demo);
            assert_eq!(scene.time_ticks, 0);
        }
    }

    #[test]
    fn test_snow_scene_layout() {
        let scene = Scene::new(Demo::Snow, &Settings::default(), 11).unwrap();
        let DemoState::Snow { snow_box, flake } = &scene.state else {
            panic!("expected snow scene");
        };
        assert_eq!(snow_box.position, 0.0);
        assert_eq!(snow_box.max_position(), 3.0);
        assert_eq!(flake.vertical_position(), 3.0 - 0.3);
        assert_eq!(flake.anchor(), 0.0);
        assert_eq!(scene.view.half_extent, 10.0);
    }

    #[test]
    fn test_invalid_settings_fail_scene() {
        let mut settings = Settings::default();
        settings.snow.box_half_width = 20.0;
        assert!(Scene::new(Demo::Snow, &settings, 1).is_err());

        let mut settings = Settings::default();
        settings.cube.axis = [0.0, 0.0, 0.0];
        assert!(Scene::new(Demo::Cube, &settings, 1).is_err());
    }

    #[test]
    fn test_solid_projection_keeps_cube_in_depth_range() {
        let scene = Scene::new(Demo::Cube, &Settings::default(), 1).unwrap();
        let proj = scene.projection(1.0);
        for z in [-0.87f32, 0.0, 0.87] {
            let clip = proj.project_point3(Vec3::new(0.0, 0.0, z));
            assert!((0.0..=1.0).contains(&clip.z));
        }
    }
}
