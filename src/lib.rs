pub mod framepace;
pub mod greeting;
pub mod particle;
pub mod raster;
pub mod scheduler;
pub mod surface;
pub mod system;

#[cfg(feature = "capture")]
pub mod capture;

pub use particle::{Color, Particle, Physics, Shape, PALETTE};
pub use raster::RasterSurface;
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler};
pub use surface::{Path, Surface};
pub use system::{ParticleSystem, Viewport, DEFAULT_PARTICLES};
