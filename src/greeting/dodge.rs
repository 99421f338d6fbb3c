use glam::Vec2;
use rand::Rng;

use crate::system::Viewport;

pub const MIN_SCALE: f32 = 0.3;
pub const SHRINK: f32 = 0.1;
/// Largest jump along either axis.
pub const MAX_JUMP: f32 = 400.0;
/// Number of alternative labels the button cycles through.
pub const VARIANTS: usize = 6;

/// A button that jumps away and shrinks every time the pointer reaches it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvasiveButton {
    pub offset: Vec2,
    pub scale: f32,
    pub variant: usize,
}

impl Default for EvasiveButton {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            variant: 0,
        }
    }
}

impl EvasiveButton {
    /// Jumps to a new offset relative to a container whose top-left corner sits at `origin`.
    ///
    /// The reach along each axis is the room left past the container, capped at
    /// [`MAX_JUMP`]. A container beyond the viewport edge leaves negative room, which
    /// is not capped, so jumps can then exceed `MAX_JUMP / 2`.
    pub fn dodge<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: Viewport, origin: Vec2) {
        self.scale = (self.scale - SHRINK).max(MIN_SCALE);

        let room = Vec2::new(
            viewport.width as f32 - origin.x - 200.0,
            viewport.height as f32 - origin.y - 100.0,
        )
        .min(Vec2::splat(MAX_JUMP));

        self.offset = Vec2::new(
            (rng.gen::<f32>() - 0.5) * room.x,
            (rng.gen::<f32>() - 0.5) * room.y,
        );
        self.variant = rng.gen_range(0..VARIANTS);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn shrinks_to_a_floor() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut button = EvasiveButton::default();
        let viewport = Viewport::new(1000, 800);

        button.dodge(&mut rng, viewport, Vec2::ZERO);
        assert!((button.scale - 0.9).abs() < 1e-6);

        for _ in 0..20 {
            button.dodge(&mut rng, viewport, Vec2::ZERO);
        }
        assert_eq!(button.scale, MIN_SCALE);
    }

    #[test]
    fn jumps_stay_within_reach() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut button = EvasiveButton::default();

        for _ in 0..500 {
            button.dodge(&mut rng, Viewport::new(1920, 1080), Vec2::new(100.0, 100.0));
            assert!(button.offset.x.abs() <= MAX_JUMP / 2.0);
            assert!(button.offset.y.abs() <= MAX_JUMP / 2.0);
            assert!(button.variant < VARIANTS);
        }
    }

    #[test]
    fn small_viewports_limit_the_jump() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut button = EvasiveButton::default();

        for _ in 0..100 {
            button.dodge(&mut rng, Viewport::new(400, 300), Vec2::new(100.0, 100.0));
            assert!(button.offset.x.abs() <= 50.0);
            assert!(button.offset.y.abs() <= 50.0);
        }
    }

    #[test]
    fn container_past_the_edge_jumps_further() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut button = EvasiveButton::default();
        // Room is 1000 - 2000 - 200 = -1200 across and 800 - 100 - 100 = 600 down.
        let origin = Vec2::new(2000.0, 100.0);

        let mut furthest = 0.0f32;
        for _ in 0..200 {
            button.dodge(&mut rng, Viewport::new(1000, 800), origin);
            assert!(button.offset.x.abs() <= 600.0);
            assert!(button.offset.y.abs() <= MAX_JUMP / 2.0);
            furthest = furthest.max(button.offset.x.abs());
        }
        assert!(furthest > MAX_JUMP / 2.0, "furthest jump {furthest}");
    }
}
