use std::f32::consts::TAU;

use glam::Vec2;
use rand::{seq::SliceRandom, Rng};

/// An opaque RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Gold, pinks and orange.
pub const PALETTE: [Color; 6] = [
    Color::rgb(0xFF, 0xD7, 0x00),
    Color::rgb(0xFF, 0x6B, 0x9D),
    Color::rgb(0xFF, 0xB6, 0xD9),
    Color::rgb(0xFF, 0xA5, 0x00),
    Color::rgb(0xFF, 0x69, 0xB4),
    Color::rgb(0xFF, 0x14, 0x93),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Heart,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Square, Shape::Triangle, Shape::Heart];
}

/// Per-tick constants applied to every live particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    /// Added to the vertical velocity each tick.
    pub gravity: f32,
    /// Horizontal velocity multiplier each tick.
    pub drag: f32,
    /// Subtracted from alpha each tick.
    pub fade: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: 0.15,
            drag: 0.99,
            fade: 0.003,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub color: Color,
    pub shape: Shape,
    pub alpha: f32,
}

impl Particle {
    /// Spawns a particle somewhere above the top edge of a surface `width` pixels wide.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f32) -> Self {
        Self {
            position: Vec2::new(rng.gen_range(0.0..=width), rng.gen_range(-110.0..=-10.0)),
            velocity: Vec2::new(rng.gen_range(-5.0..=5.0), rng.gen_range(2.0..=8.0)),
            size: rng.gen_range(3.0..=11.0),
            rotation: rng.gen_range(0.0..TAU),
            rotation_speed: rng.gen_range(-0.075..=0.075),
            color: *PALETTE.choose(rng).unwrap_or(&PALETTE[0]),
            shape: *Shape::ALL.choose(rng).unwrap_or(&Shape::Circle),
            alpha: 1.0,
        }
    }

    /// Whether the particle survives into the next tick on a surface `height` pixels tall.
    pub fn is_alive(&self, height: f32) -> bool {
        self.position.y < height && self.alpha > 0.0
    }

    /// Advances the particle by one tick.
    pub fn advance(&mut self, physics: &Physics) {
        self.position += self.velocity;
        self.velocity.y += physics.gravity;
        self.velocity.x *= physics.drag;
        self.rotation += self.rotation_speed;
        self.alpha -= physics.fade;
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn spawn_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = Particle::spawn(&mut rng, 1000.0);
            assert!((0.0..=1000.0).contains(&p.position.x));
            assert!((-110.0..=-10.0).contains(&p.position.y));
            assert!((-5.0..=5.0).contains(&p.velocity.x));
            assert!((2.0..=8.0).contains(&p.velocity.y));
            assert!((3.0..=11.0).contains(&p.size));
            assert!((0.0..TAU).contains(&p.rotation));
            assert!(p.rotation_speed.abs() <= 0.075);
            assert!(PALETTE.contains(&p.color));
            assert_eq!(p.alpha, 1.0);
        }
    }

    #[test]
    fn spawn_uses_every_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let shapes: Vec<Shape> = (0..200).map(|_| Particle::spawn(&mut rng, 10.0).shape).collect();
        for shape in Shape::ALL {
            assert!(shapes.contains(&shape), "{shape:?} never spawned");
        }
    }

    #[test]
    fn advance_applies_physics_exactly() {
        let mut rng = StdRng::seed_from_u64(3);
        let physics = Physics::default();
        let mut p = Particle::spawn(&mut rng, 500.0);
        let before = p;

        p.advance(&physics);

        assert_eq!(p.position, before.position + before.velocity);
        assert_eq!(p.velocity.y, before.velocity.y + 0.15);
        assert_eq!(p.velocity.x, before.velocity.x * 0.99);
        assert_eq!(p.rotation, before.rotation + before.rotation_speed);
        assert_eq!(p.alpha, before.alpha - 0.003);
    }

    #[test]
    fn alive_until_below_surface_or_faded() {
        let mut p = Particle::spawn(&mut StdRng::seed_from_u64(0), 100.0);
        assert!(p.is_alive(100.0));

        p.position.y = 100.0;
        assert!(!p.is_alive(100.0));

        p.position.y = 50.0;
        p.alpha = 0.0;
        assert!(!p.is_alive(100.0));
    }
}
