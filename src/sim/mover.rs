//! Reflecting bounded mover
//!
//! One scalar coordinate sliding back and forth inside an interval. The snow
//! box uses it to travel left and right across the view.

use serde::{Deserialize, Serialize};

use crate::error::DemoError;

/// What happened during a single `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverStep {
    Moved,
    /// Hit a bound and the speed was negated
    Reflected,
}

/// A position bouncing between `lower + margin` and `upper - margin`.
///
/// The margin is the half-extent of whatever is being moved, so with world
/// bounds [-10, 10] and a box half-width of 7 the box center travels in [-3, 3]
/// and its edges never leave the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundedMover {
    pub position: f32,
    pub speed: f32,
    lower: f32,
    upper: f32,
    margin: f32,
}

impl BoundedMover {
    pub fn new(
        position: f32,
        speed: f32,
        lower: f32,
        upper: f32,
        margin: f32,
    ) -> Result<Self, DemoError> {
        if ![position, speed, lower, upper, margin]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(DemoError::config("mover values must be finite"));
        }
        if margin < 0.0 {
            return Err(DemoError::config(format!(
                "mover margin must not be negative (got {margin})"
            )));
        }
        if lower + margin > upper - margin {
            return Err(DemoError::config(format!(
                "mover interval [{lower}, {upper}] is too small for margin {margin}"
            )));
        }

        let mut mover = Self {
            position,
            speed,
            lower,
            upper,
            margin,
        };
        mover.position = position.clamp(mover.min_position(), mover.max_position());
        Ok(mover)
    }

    pub fn lower_bound(&self) -> f32 {
        self.lower
    }

    pub fn upper_bound(&self) -> f32 {
        self.upper
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Lowest position the mover may take
    #[inline]
    pub fn min_position(&self) -> f32 {
        self.lower + self.margin
    }

    /// Highest position the mover may take
    #[inline]
    pub fn max_position(&self) -> f32 {
        self.upper - self.margin
    }

    /// Move by `speed * dt` and reflect off the bounds.
    ///
    /// Landing exactly on a bound counts as hitting it. The position is
    /// clamped back onto the bound it crossed, and the speed only flips when
    /// it still points at that bound, so one crossing flips exactly once.
    pub fn advance(&mut self, dt: f32) -> MoverStep {
        let lo = self.min_position();
        let hi = self.max_position();

        self.position += self.speed * dt;

        if self.position >= hi {
            self.position = hi;
            if self.speed > 0.0 {
                self.speed = -self.speed;
                return MoverStep::Reflected;
            }
        } else if self.position <= lo {
            self.position = lo;
            if self.speed < 0.0 {
                self.speed = -self.speed;
                return MoverStep::Reflected;
            }
        }

        MoverStep::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_boundary_reflects_immediately() {
        // Interval [0, 4] with margin 1 -> positions in [1, 3]
        let mut mover = BoundedMover::new(2.0, 0.5, 0.0, 4.0, 1.0).unwrap();

        assert_eq!(mover.advance(1.0), MoverStep::Moved);
        assert_eq!(mover.position, 2.5);

        // Lands exactly on 3.0 and reverses on the same step
        assert_eq!(mover.advance(1.0), MoverStep::Reflected);
        assert_eq!(mover.position, 3.0);
        assert_eq!(mover.speed, -0.5);

        assert_eq!(mover.advance(1.0), MoverStep::Moved);
        assert_eq!(mover.position, 2.5);
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let mut mover = BoundedMover::new(2.9, 0.5, 0.0, 4.0, 1.0).unwrap();
        assert_eq!(mover.advance(1.0), MoverStep::Reflected);
        assert_eq!(mover.position, 3.0);
        assert!(mover.speed < 0.0);
    }

    #[test]
    fn test_lower_bound_reflects() {
        let mut mover = BoundedMover::new(1.5, -0.5, 0.0, 4.0, 1.0).unwrap();
        assert_eq!(mover.advance(1.0), MoverStep::Reflected);
        assert_eq!(mover.position, 1.0);
        assert_eq!(mover.speed, 0.5);
    }

    #[test]
    fn test_sitting_on_bound_with_zero_dt() {
        let mut mover = BoundedMover::new(3.0, 0.5, 0.0, 4.0, 1.0).unwrap();
        assert_eq!(mover.advance(0.0), MoverStep::Reflected);
        // Already heading away: no second flip
        assert_eq!(mover.advance(0.0), MoverStep::Moved);
        assert_eq!(mover.speed, -0.5);
    }

    #[test]
    fn test_snow_box_travel() {
        let mut mover = BoundedMover::new(
            0.0,
            BOX_SPEED,
            -SNOW_WORLD_HALF_EXTENT,
            SNOW_WORLD_HALF_EXTENT,
            BOX_HALF_WIDTH,
        )
        .unwrap();
        assert!((mover.max_position() - 3.0).abs() < 1e-6);
        assert!((mover.min_position() + 3.0).abs() < 1e-6);

        // ~3000 ticks to the right edge, ~6000 back to the left
        let mut reflections = 0;
        for _ in 0..9100 {
            if mover.advance(1.0) == MoverStep::Reflected {
                reflections += 1;
            }
        }
        assert_eq!(reflections, 2);
        assert!(mover.speed > 0.0);
    }

    #[test]
    fn test_start_outside_is_clamped() {
        let mover = BoundedMover::new(9.0, 0.1, -10.0, 10.0, 7.0).unwrap();
        assert_eq!(mover.position, 3.0);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(BoundedMover::new(0.0, 1.0, -1.0, 1.0, 2.0).is_err());
        assert!(BoundedMover::new(0.0, 1.0, -1.0, 1.0, -0.5).is_err());
        assert!(BoundedMover::new(0.0, f32::NAN, -1.0, 1.0, 0.0).is_err());
        assert!(BoundedMover::new(0.0, 1.0, 1.0, -1.0, 0.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_bounds(
            start in -10.0f32..10.0,
            speed in -2.0f32..2.0,
            margin in 0.0f32..5.0,
            dts in proptest::collection::vec(0.0f32..3.0, 1..300),
        ) {
            let mut mover = BoundedMover::new(start, speed, -10.0, 10.0, margin).unwrap();
            for dt in dts {
                mover.advance(dt);
                prop_assert!(mover.position >= mover.lower_bound());
                prop_assert!(mover.position <= mover.upper_bound());
                prop_assert!(mover.position >= mover.min_position());
                prop_assert!(mover.position <= mover.max_position());
            }
        }

        #[test]
        fn prop_flip_only_on_crossing(
            start in -3.0f32..3.0,
            speed in -1.0f32..1.0,
            dts in proptest::collection::vec(0.0f32..2.0, 1..300),
        ) {
            let mut mover = BoundedMover::new(start, speed, -10.0, 10.0, 7.0).unwrap();
            let mut last_flip: Option<f32> = None;
            for dt in dts {
                let before = mover.speed;
                let raw = mover.position + mover.speed * dt;
                let step = mover.advance(dt);

                let would_cross = (raw >= mover.max_position() && before > 0.0)
                    || (raw <= mover.min_position() && before < 0.0);
                prop_assert_eq!(step == MoverStep::Reflected, would_cross);

                if step == MoverStep::Reflected {
                    prop_assert_eq!(mover.speed, -before);
                    // Consecutive flips must come from opposite bounds
                    if let Some(bound) = last_flip {
                        let degenerate = mover.min_position() == mover.max_position();
                        prop_assert!(bound != mover.position || degenerate);
                    }
                    last_flip = Some(mover.position);
                } else {
                    prop_assert_eq!(mover.speed, before);
                }
            }
        }
    }
}
