//! Hover square: jumps somewhere else whenever the cursor touches it

use glam::Vec2;
use rand::Rng;
use rand::distr::{Distribution, Uniform};

use crate::consts::SQUARE_START_COLOR;
use crate::error::DemoError;

#[derive(Debug, Clone)]
pub struct HoverSquare {
    pub center: Vec2,
    pub half_side: f32,
    pub color: [f32; 3],
    world_half_extent: f32,
    respawns: u32,
    position_dist: Uniform<f32>,
    channel_dist: Uniform<f32>,
}

impl HoverSquare {
    /// Place a square of `half_side` at a random spot fully inside the
    /// `[-world_half_extent, world_half_extent]` window.
    pub fn new<R: Rng + ?Sized>(
        half_side: f32,
        world_half_extent: f32,
        rng: &mut R,
    ) -> Result<Self, DemoError> {
        if !half_side.is_finite() || !world_half_extent.is_finite() || half_side <= 0.0 {
            return Err(DemoError::config("square half_side must be positive"));
        }
        if half_side > world_half_extent {
            return Err(DemoError::config(format!(
                "square half_side {half_side} does not fit in world half-extent {world_half_extent}"
            )));
        }

        let position_dist =
            Uniform::new_inclusive(-world_half_extent + half_side, world_half_extent - half_side)
                .map_err(|e| DemoError::config(format!("square position distribution: {e}")))?;
        let channel_dist = Uniform::new(0.0f32, 1.0)
            .map_err(|e| DemoError::config(format!("color distribution: {e}")))?;

        let center = Vec2::new(position_dist.sample(rng), position_dist.sample(rng));

        Ok(Self {
            center,
            half_side,
            color: SQUARE_START_COLOR,
            world_half_extent,
            respawns: 0,
            position_dist,
            channel_dist,
        })
    }

    pub fn world_half_extent(&self) -> f32 {
        self.world_half_extent
    }

    /// Number of respawns so far; renderers re-upload the mesh when it changes
    pub fn respawns(&self) -> u32 {
        self.respawns
    }

    /// Edge-inclusive point test
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_side && d.y <= self.half_side
    }

    /// Corners in draw order: bottom-left, top-left, top-right, bottom-right
    pub fn corners(&self) -> [Vec2; 4] {
        let h = self.half_side;
        let c = self.center;
        [
            c + Vec2::new(-h, -h),
            c + Vec2::new(-h, h),
            c + Vec2::new(h, h),
            c + Vec2::new(h, -h),
        ]
    }

    /// If `point` is on the square, move it to a new random position with a
    /// new random color. Returns whether it moved.
    pub fn hover<R: Rng + ?Sized>(&mut self, point: Vec2, rng: &mut R) -> bool {
        if !self.contains(point) {
            return false;
        }

        self.center = Vec2::new(self.position_dist.sample(rng), self.position_dist.sample(rng));
        self.color = [
            self.channel_dist.sample(rng),
            self.channel_dist.sample(rng),
            self.channel_dist.sample(rng),
        ];
        self.respawns = self.respawns.wrapping_add(1);

        log::debug!(
            "Square respawned at ({:.2}, {:.2}) color {:?}",
            self.center.x,
            self.center.y,
            self.color
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fits(square: &HoverSquare) -> bool {
        let limit = square.world_half_extent();
        square
            .corners()
            .iter()
            .all(|c| c.x.abs() <= limit && c.y.abs() <= limit)
    }

    #[test]
    fn test_starts_cyan_inside_world() {
        let mut rng = Pcg32::seed_from_u64(5);
        let square = HoverSquare::new(1.0, 10.0, &mut rng).unwrap();
        assert_eq!(square.color, [0.0, 1.0, 1.0]);
        assert!(fits(&square));
        assert_eq!(square.respawns(), 0);
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut square = HoverSquare::new(1.0, 10.0, &mut rng).unwrap();
        square.center = Vec2::new(2.0, -3.0);

        assert!(square.contains(Vec2::new(2.0, -3.0)));
        assert!(square.contains(Vec2::new(3.0, -2.0)));
        assert!(square.contains(Vec2::new(1.0, -4.0)));
        assert!(!square.contains(Vec2::new(3.01, -3.0)));
        assert!(!square.contains(Vec2::new(2.0, -1.9)));
    }

    #[test]
    fn test_hover_miss_leaves_square() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut square = HoverSquare::new(1.0, 10.0, &mut rng).unwrap();
        square.center = Vec2::new(0.0, 0.0);

        assert!(!square.hover(Vec2::new(5.0, 5.0), &mut rng));
        assert_eq!(square.center, Vec2::ZERO);
        assert_eq!(square.color, [0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_hover_hit_respawns() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut square = HoverSquare::new(1.0, 10.0, &mut rng).unwrap();
        let center = square.center;

        assert!(square.hover(center, &mut rng));
        assert_eq!(square.respawns(), 1);
        assert!(fits(&square));
        assert!(square.color.iter().all(|c| (0.0..1.0).contains(c)));
    }

    #[test]
    fn test_square_filling_world_is_pinned() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut square = HoverSquare::new(10.0, 10.0, &mut rng).unwrap();
        assert_eq!(square.center, Vec2::ZERO);
        assert!(square.hover(Vec2::ZERO, &mut rng));
        assert_eq!(square.center, Vec2::ZERO);
    }

    #[test]
    fn test_rejects_oversized_square() {
        let mut rng = Pcg32::seed_from_u64(5);
        assert!(HoverSquare::new(11.0, 10.0, &mut rng).is_err());
        assert!(HoverSquare::new(0.0, 10.0, &mut rng).is_err());
    }

    proptest! {
        #[test]
        fn prop_respawn_stays_inside(seed in any::<u64>(), hits in 1usize..50) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut square = HoverSquare::new(1.0, 10.0, &mut rng).unwrap();
            for _ in 0..hits {
                let center = square.center;
                prop_assert!(square.hover(center, &mut rng));
                prop_assert!(fits(&square));
            }
            prop_assert_eq!(square.respawns() as usize, hits);
        }
    }
}
