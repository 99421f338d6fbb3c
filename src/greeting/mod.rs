//! The page around the confetti: music, page flow and decorations.

pub mod audio;
pub mod decor;
pub mod dodge;
pub mod session;

use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::{
    scheduler::FrameScheduler,
    surface::Surface,
    system::{ParticleSystem, Viewport},
};

use self::{
    audio::{play_or_warn, AudioOutput, Track},
    decor::Decoration,
    dodge::EvasiveButton,
};

/// Chance that a periodic encore spawns another wave of hearts.
pub const ENCORE_CHANCE: f64 = 0.3;
pub const ENCORE_INTERVAL: Duration = Duration::from_secs(2);
/// Fade between the surprise page and the proposal; petals fall once it ends.
pub const REVEAL_TRANSITION: Duration = Duration::from_millis(600);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Surprise,
    Valentine,
}

/// Decorations to show after the proposal is accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct Celebration {
    pub hearts: Vec<Decoration>,
    pub burst: Vec<Decoration>,
}

pub struct Greeting<A> {
    audio: A,
    page: Page,
    music_playing: bool,
    accepted: bool,
    viewport: Viewport,
    pub button: EvasiveButton,
}

impl<A: AudioOutput> Greeting<A> {
    pub fn new(audio: A, viewport: Viewport) -> Self {
        Self {
            audio,
            page: Page::Surprise,
            music_playing: false,
            accepted: false,
            viewport,
            button: EvasiveButton::default(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Flips background music. The flag follows the request even if playback failed.
    pub fn toggle_music(&mut self) {
        if self.music_playing {
            self.audio.pause(Track::Background);
            self.music_playing = false;
        } else {
            play_or_warn(&mut self.audio, Track::Background);
            self.music_playing = true;
        }
    }

    /// Leaves the surprise page for the proposal, returning the petals to drop.
    pub fn reveal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Decoration> {
        play_or_warn(&mut self.audio, Track::Background);
        self.music_playing = true;

        self.page = Page::Valentine;
        info!("Revealed the proposal");

        let mut petals = decor::rose_petals(rng, self.viewport);
        for petal in &mut petals {
            petal.delay += REVEAL_TRANSITION;
        }
        petals
    }

    /// Celebrates the first acceptance; later calls do nothing.
    pub fn accept<S, F, R, Q>(
        &mut self,
        confetti: &mut ParticleSystem<S, F, Q>,
        rng: &mut R,
    ) -> Option<Celebration>
    where
        S: Surface,
        F: FrameScheduler,
        Q: Rng,
        R: Rng + ?Sized,
    {
        if self.accepted {
            debug!("Ignoring repeated accept");
            return None;
        }
        self.accepted = true;

        self.audio.pause(Track::Background);
        self.music_playing = false;
        play_or_warn(&mut self.audio, Track::Celebration);

        confetti.start();
        info!("Accepted, {} confetti particles", confetti.len());

        Some(Celebration {
            hearts: decor::floating_hearts(rng, self.viewport),
            burst: decor::celebration_burst(rng, self.viewport),
        })
    }

    /// Occasionally sends another wave of hearts once accepted.
    pub fn encore<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Vec<Decoration>> {
        if self.accepted && rng.gen_bool(ENCORE_CHANCE) {
            Some(decor::floating_hearts(rng, self.viewport))
        } else {
            None
        }
    }

    /// The pointer reached the decline button.
    pub fn dodge<R: Rng + ?Sized>(&mut self, rng: &mut R, container: glam::Vec2) {
        if !self.accepted {
            self.button.dodge(rng, self.viewport, container);
        }
    }

    /// Enter accepts on the proposal page and reveals it otherwise.
    pub fn on_enter<S, F, R, Q>(&mut self, confetti: &mut ParticleSystem<S, F, Q>, rng: &mut R)
    where
        S: Surface,
        F: FrameScheduler,
        Q: Rng,
        R: Rng + ?Sized,
    {
        match self.page {
            Page::Valentine => {
                self.accept(confetti, rng);
            }
            Page::Surprise => {
                self.reveal(rng);
            }
        }
    }
}
