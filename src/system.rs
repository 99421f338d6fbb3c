use glam::Vec2;
use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    particle::{Particle, Physics, Shape},
    scheduler::{FrameHandle, FrameScheduler},
    surface::{Path, Surface},
};

pub const DEFAULT_PARTICLES: usize = 150;

/// Size of the visible area in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Confetti: a batch of particles falling, spinning and fading one tick per frame.
pub struct ParticleSystem<S, F, R = StdRng> {
    particles: Vec<Particle>,
    physics: Physics,
    batch: usize,
    viewport: Viewport,

    surface: S,
    scheduler: F,
    pending: Option<FrameHandle>,
    rng: R,
}

impl<S: Surface, F: FrameScheduler> ParticleSystem<S, F> {
    pub fn new(surface: S, scheduler: F, viewport: Viewport) -> Self {
        Self::with_rng(surface, scheduler, viewport, StdRng::from_entropy())
    }
}

impl<S: Surface, F: FrameScheduler, R: Rng> ParticleSystem<S, F, R> {
    pub fn with_rng(surface: S, scheduler: F, viewport: Viewport, rng: R) -> Self {
        let mut system = Self {
            particles: Vec::new(),
            physics: Physics::default(),
            batch: DEFAULT_PARTICLES,
            viewport,

            surface,
            scheduler,
            pending: None,
            rng,
        };
        system.resize(viewport);
        system
    }

    pub fn with_physics(mut self, physics: Physics) -> Self {
        self.physics = physics;
        self
    }

    /// Number of particles spawned by [`start`](Self::start).
    pub fn with_batch(mut self, batch: usize) -> Self {
        self.batch = batch;
        self
    }

    /// Matches the surface to a new viewport. Live particles keep their absolute positions.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface.resize(viewport.width, viewport.height);
    }

    pub fn create_particles(&mut self, count: usize) {
        let width = self.viewport.width as f32;
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::spawn(&mut self.rng, width));
        }
    }

    /// Clears the surface, culls dead particles, then advances and draws the rest.
    pub fn tick(&mut self) {
        self.surface.clear();

        let height = self.viewport.height as f32;
        self.particles.retain(|p| p.is_alive(height));

        for particle in &mut self.particles {
            particle.advance(&self.physics);
            draw(&mut self.surface, particle);
        }

        if self.particles.is_empty() {
            if self.pending.is_none() {
                debug!("Confetti finished");
            }
        } else if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    /// Runs the tick for a delivered frame, ignoring frames that were cancelled or superseded.
    /// Returns whether a tick ran.
    pub fn on_frame(&mut self, frame: FrameHandle) -> bool {
        if self.pending != Some(frame) {
            trace!("Dropping stale frame {}", frame.id());
            return false;
        }

        self.pending = None;
        self.tick();
        true
    }

    pub fn start(&mut self) {
        self.cancel_pending();
        self.particles.clear();
        self.create_particles(self.batch);
        debug!(
            "Confetti started: {} particles on {}x{}",
            self.particles.len(),
            self.viewport.width,
            self.viewport.height
        );
        self.tick();
    }

    pub fn stop(&mut self) {
        self.cancel_pending();
        self.particles.clear();
        self.surface.clear();
        debug!("Confetti stopped");
    }

    fn cancel_pending(&mut self) {
        if let Some(frame) = self.pending.take() {
            self.scheduler.cancel_frame(frame);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

fn draw<S: Surface>(surface: &mut S, particle: &Particle) {
    let size = particle.size;

    surface.save();
    surface.set_global_alpha(particle.alpha);
    surface.translate(particle.position);
    surface.rotate(particle.rotation);
    surface.set_fill(particle.color);

    match particle.shape {
        Shape::Circle => surface.fill_circle(Vec2::ZERO, size / 2.0),
        Shape::Square => surface.fill_rect(Vec2::splat(-size / 2.0), Vec2::splat(size)),
        Shape::Triangle => surface.fill_path(&triangle(size)),
        Shape::Heart => surface.fill_path(&heart(Vec2::new(0.0, -size / 2.0), size)),
    }

    surface.restore();
}

fn triangle(size: f32) -> Path {
    let half = size / 2.0;
    Path::new()
        .move_to(Vec2::new(0.0, -half))
        .line_to(Vec2::new(-half, half))
        .line_to(Vec2::new(half, half))
        .close()
}

/// Heart of height `size` whose top cleft sits a quarter below `top`.
fn heart(top: Vec2, size: f32) -> Path {
    let (x, y) = (top.x, top.y);
    let half = size / 2.0;
    let quarter = size / 4.0;
    let cleft = Vec2::new(x, y + quarter);

    Path::new()
        .move_to(cleft)
        .curve_to(Vec2::new(x, y), Vec2::new(x - half, y), Vec2::new(x - half, y + quarter))
        .curve_to(
            Vec2::new(x - half, y + half),
            Vec2::new(x, y + size * 0.75),
            Vec2::new(x, y + size),
        )
        .curve_to(
            Vec2::new(x, y + size * 0.75),
            Vec2::new(x + half, y + half),
            Vec2::new(x + half, y + quarter),
        )
        .curve_to(Vec2::new(x + half, y), Vec2::new(x, y), cleft)
        .close()
}
