mod cli;

use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use confetti::{
    framepace::FramePacer,
    greeting::{audio::Muted, session::Session, Greeting},
    FrameQueue, ParticleSystem, Physics, RasterSurface, Viewport,
};

#[cfg(feature = "capture")]
use confetti::capture::{FrameCapture, DEFAULT_PATH};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Collect Arguments
    let args = cli::Args::parse();
    anyhow::ensure!(
        args.width > 0 && args.height > 0,
        "viewport must not be empty, got {}x{}",
        args.width,
        args.height
    );
    let viewport = Viewport::new(args.width, args.height);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut confetti = ParticleSystem::with_rng(
        RasterSurface::new(viewport.width, viewport.height),
        FrameQueue::new(),
        viewport,
        StdRng::from_rng(&mut rng)?,
    )
    .with_physics(Physics {
        gravity: args.gravity,
        ..Default::default()
    })
    .with_batch(args.particles);
    let mut greeting = Greeting::new(Muted, viewport);

    #[cfg(feature = "capture")]
    let mut capture = if args.capture {
        Some(FrameCapture::create(DEFAULT_PATH, viewport.width, viewport.height)?)
    } else {
        None
    };

    // Session
    let mut session =
        Session::new(FramePacer::new(args.framerate)).with_stop_after(args.stop_after);
    let summary = session.run(&mut confetti, &mut greeting, &mut rng, |_surface| {
        #[cfg(feature = "capture")]
        if let Some(capture) = &mut capture {
            capture.write_frame(_surface)?;
        }
        Ok::<_, std::io::Error>(())
    })?;

    #[cfg(feature = "capture")]
    if let Some(capture) = capture {
        let path = capture.path().to_path_buf();
        let frames = capture.finish()?;
        info!("Captured {frames} frames to {}", path.display());
    }

    info!(
        "Confetti done: {} frames, peak {} particles, {} decorations over {:.1}s ({:.1} fps)",
        summary.frames,
        summary.peak,
        summary.decorations,
        summary.elapsed.as_secs_f32(),
        session.pacer().average_framerate()
    );

    Ok(())
}
