use clap::Parser;

/// Headless confetti greeting: reveals the page, accepts, and plays the confetti out
#[derive(Parser, Debug)]
#[command()]
pub struct Args {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Particles to spawn when the confetti starts
    #[arg(short, long, default_value_t = 150)]
    pub particles: usize,

    /// The framerate frames are delivered at
    ///
    /// 0 runs as fast as possible
    #[arg(short, long, default_value_t = 60)]
    pub framerate: u32,

    /// Downward acceleration per frame
    #[arg(short, long, default_value_t = 0.15f32)]
    pub gravity: f32,

    /// Seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Stop the confetti after this many frames
    #[arg(long)]
    pub stop_after: Option<u64>,

    /// Write every rendered frame to `frame_buffer.bin`
    #[cfg(feature = "capture")]
    #[arg(short, long)]
    pub capture: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_desktop_window() {
        let args = Args::parse_from(["confetti"]);
        assert_eq!((args.width, args.height), (1000, 800));
        assert_eq!(args.particles, 150);
        assert_eq!(args.gravity, 0.15);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn flags_override() {
        let args = Args::parse_from(["confetti", "--seed", "9", "-f", "0", "--stop-after", "30"]);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.framerate, 0);
        assert_eq!(args.stop_after, Some(30));
    }
}
