//! Fixed timestep simulation tick

use glam::Vec2;

use super::state::{DemoState, Scene};
use crate::consts::{MAX_FRAME_SECS, MAX_SUBSTEPS};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor position in world coordinates, set only on the tick after the
    /// cursor moved
    pub cursor: Option<Vec2>,
}

/// Advance the scene by `dt` ticks
pub fn tick(scene: &mut Scene, input: &TickInput, dt: f32) {
    let dt = dt.max(0.0);
    scene.time_ticks += 1;
    scene.elapsed_secs += dt * scene.seconds_per_tick;

    match &mut scene.state {
        DemoState::Snow { snow_box, flake } => {
            // Box first: the flake wraps around where the box is now
            snow_box.advance(dt);
            flake.advance(dt, snow_box.position, &mut scene.rng);
        }
        DemoState::Square { square } => {
            if let Some(cursor) = input.cursor {
                square.hover(cursor, &mut scene.rng);
            }
        }
        // Rotation is a pure function of elapsed time
        DemoState::Cube { .. } | DemoState::Blend { .. } => {}
    }
}

/// Wall-clock to tick converter
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    /// Ticks owed to the simulation, always below 1 after `advance` returns
    accumulator: f32,
}

impl FixedStep {
    /// Ticks to run for a frame that took `frame_secs`, at most
    /// `MAX_SUBSTEPS`. Whole ticks past the cap are dropped.
    pub fn advance(&mut self, frame_secs: f32, tick_hz: f32) -> u32 {
        self.accumulator += frame_secs.clamp(0.0, MAX_FRAME_SECS) * tick_hz;
        let ticks = (self.accumulator.floor() as u32).min(MAX_SUBSTEPS);
        self.accumulator = self.accumulator.fract();
        ticks
    }

    pub fn pending(&self) -> f32 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Demo, Settings};

    #[test]
    fn test_snow_box_and_flake_move() {
        let mut scene = Scene::new(Demo::Snow, &Settings::default(), 12345).unwrap();
        let input = TickInput::default();

        for _ in 0..100 {
            tick(&mut scene, &input, 1.0);
        }

        let DemoState::Snow { snow_box, flake } = &scene.state else {
            panic!("expected snow scene");
        };
        assert!((snow_box.position - 0.1).abs() < 1e-4);
        assert!((flake.vertical_position() - 2.6).abs() < 1e-4);
        assert_eq!(flake.anchor(), snow_box.position);
        assert_eq!(scene.time_ticks, 100);
    }

    #[test]
    fn test_snow_flake_resets_at_floor() {
        let mut scene = Scene::new(Demo::Snow, &Settings::default(), 1).unwrap();
        let input = TickInput::default();

        for _ in 0..5400 {
            tick(&mut scene, &input, 1.0);
        }

        let DemoState::Snow { flake, snow_box } = &scene.state else {
            panic!("expected snow scene");
        };
        assert_eq!(flake.generation(), 1);
        assert_eq!(flake.vertical_position(), 3.0);
        let x = flake.horizontal_position();
        assert!(x >= snow_box.position - 7.0 && x <= snow_box.position + 7.0);
    }

    #[test]
    fn test_square_hover_via_input() {
        let mut scene = Scene::new(Demo::Square, &Settings::default(), 99).unwrap();
        let center = match &scene.state {
            DemoState::Square { square } => square.center,
            _ => panic!("expected square scene"),
        };

        // Cursor far outside the world never hits
        let miss = TickInput {
            cursor: Some(Vec2::new(100.0, 100.0)),
        };
        tick(&mut scene, &miss, 1.0);

        let hit = TickInput {
            cursor: Some(center),
        };
        tick(&mut scene, &hit, 1.0);

        let DemoState::Square { square } = &scene.state else {
            panic!("expected square scene");
        };
        assert_eq!(square.respawns(), 1);
    }

    #[test]
    fn test_cube_elapsed_time() {
        let mut scene = Scene::new(Demo::Cube, &Settings::default(), 1).unwrap();
        for _ in 0..60 {
            tick(&mut scene, &TickInput::default(), 1.0);
        }
        assert!((scene.elapsed_secs - 1.0).abs() < 1e-4);

        let DemoState::Cube { spinner } = &scene.state else {
            panic!("expected cube scene");
        };
        assert!((spinner.angle_degrees(scene.elapsed_secs) - 190.0).abs() < 0.05);
    }

    #[test]
    fn test_determinism() {
        // Two scenes with the same seed produce identical results
        let settings = Settings::default();
        let mut scene1 = Scene::new(Demo::Snow, &settings, 99999).unwrap();
        let mut scene2 = Scene::new(Demo::Snow, &settings, 99999).unwrap();

        for _ in 0..12000 {
            tick(&mut scene1, &TickInput::default(), 1.0);
            tick(&mut scene2, &TickInput::default(), 1.0);
        }

        let (DemoState::Snow { flake: a, .. }, DemoState::Snow { flake: b, .. }) =
            (&scene1.state, &scene2.state)
        else {
            panic!("expected snow scenes");
        };
        assert!(a.generation() >= 2);
        assert_eq!(a.generation(), b.generation());
        assert_eq!(a.radius(), b.radius());
        assert_eq!(a.horizontal_position(), b.horizontal_position());
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut scene = Scene::new(Demo::Snow, &Settings::default(), 1).unwrap();
        tick(&mut scene, &TickInput::default(), -5.0);
        let DemoState::Snow { snow_box, .. } = &scene.state else {
            panic!("expected snow scene");
        };
        assert_eq!(snow_box.position, 0.0);
    }

    #[test]
    fn test_fixed_step_carries_fraction() {
        let mut step = FixedStep::default();
        // 1.5 ticks, then 1.5 more
        assert_eq!(step.advance(0.0625, 24.0), 1);
        assert_eq!(step.pending(), 0.5);
        assert_eq!(step.advance(0.0625, 24.0), 2);
        assert_eq!(step.pending(), 0.0);
    }

    #[test]
    fn test_fixed_step_drops_backlog_past_substep_cap() {
        let mut step = FixedStep::default();
        // 100 ticks owed per frame at 1 kHz, capped at MAX_SUBSTEPS
        for _ in 0..1000 {
            assert_eq!(step.advance(1.0, 1000.0), MAX_SUBSTEPS);
            assert!(step.pending() < 1.0);
        }
    }

    #[test]
    fn test_fixed_step_ignores_negative_frames() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(-5.0, 60.0), 0);
        assert_eq!(step.pending(), 0.0);
    }
}
