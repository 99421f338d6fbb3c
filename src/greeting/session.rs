//! One pass through the page: reveal, accept, then confetti until it settles.

use std::time::Duration;

use log::{debug, info, trace};
use rand::Rng;

use super::{audio::AudioOutput, decor, Greeting, ENCORE_INTERVAL};
use crate::{
    framepace::FramePacer, scheduler::FrameQueue, surface::Surface, system::ParticleSystem,
};

/// Simulated time per frame when running unpaced.
pub const NOMINAL_FRAMETIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Ticks that ran, counting the one `start` runs and the one that empties the system.
    pub frames: u64,
    pub peak: usize,
    pub decorations: usize,
    /// Simulated time, one frame period per delivered frame.
    pub elapsed: Duration,
    pub stopped: bool,
}

pub struct Session {
    pacer: FramePacer,
    stop_after: Option<u64>,
}

impl Session {
    pub fn new(pacer: FramePacer) -> Self {
        Self {
            pacer,
            stop_after: None,
        }
    }

    /// Stops the confetti once this many frames have ticked.
    pub fn with_stop_after(mut self, stop_after: Option<u64>) -> Self {
        self.stop_after = stop_after;
        self
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Plays the session out, calling `rendered` with the surface after every tick.
    pub fn run<A, S, Q, R, E>(
        &mut self,
        confetti: &mut ParticleSystem<S, FrameQueue, Q>,
        greeting: &mut Greeting<A>,
        rng: &mut R,
        mut rendered: impl FnMut(&S) -> Result<(), E>,
    ) -> Result<Summary, E>
    where
        A: AudioOutput,
        S: Surface,
        Q: Rng,
        R: Rng + ?Sized,
    {
        let mut decorations = greeting.reveal(rng).len();

        let mut frames = 0;
        match greeting.accept(confetti, rng) {
            Some(celebration) => {
                decorations += celebration.hearts.len() + celebration.burst.len();
                frames += 1;
                rendered(confetti.surface())?;
            }
            None => debug!("Session joined after acceptance, no confetti"),
        }
        let mut peak = confetti.len();

        let frametime = self.pacer.period().unwrap_or(NOMINAL_FRAMETIME);
        let mut elapsed = Duration::ZERO;
        let mut next_heart = Duration::ZERO;
        let mut next_encore = ENCORE_INTERVAL;
        let mut stopped = false;

        while let Some(frame) = confetti.scheduler_mut().next_frame() {
            self.pacer.begin_frame();

            if !stopped && self.stop_after.is_some_and(|limit| frames >= limit) {
                info!("Stopping confetti after {frames} frames");
                confetti.stop();
                stopped = true;
            }

            if confetti.on_frame(frame) {
                frames += 1;
                peak = peak.max(confetti.len());
                rendered(confetti.surface())?;
            }

            elapsed += frametime;
            if elapsed >= next_heart {
                let heart = decor::background_heart(rng, greeting.viewport);
                trace!("Background heart at x={:.0}", heart.x);
                decorations += 1;
                next_heart += decor::BACKGROUND_INTERVAL;
            }
            if elapsed >= next_encore {
                if let Some(wave) = greeting.encore(rng) {
                    decorations += wave.len();
                }
                next_encore += ENCORE_INTERVAL;
            }

            self.pacer.end_frame();
        }

        Ok(Summary {
            frames,
            peak,
            decorations,
            elapsed,
            stopped,
        })
    }
}
