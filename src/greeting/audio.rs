use log::warn;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    Background,
    Celebration,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("no audio output device")]
    NoDevice,
    #[error("playback blocked until user interaction")]
    Blocked,
    #[error("playback failed: {0}")]
    Playback(String),
}

pub trait AudioOutput {
    fn play(&mut self, track: Track) -> Result<(), AudioError>;
    fn pause(&mut self, track: Track);
}

/// Output for hosts without sound; every `play` fails.
#[derive(Debug, Default)]
pub struct Muted;

impl AudioOutput for Muted {
    fn play(&mut self, _track: Track) -> Result<(), AudioError> {
        Err(AudioError::NoDevice)
    }

    fn pause(&mut self, _track: Track) {}
}

/// Plays `track`, logging instead of propagating a failure. Returns whether it played.
pub fn play_or_warn<A: AudioOutput + ?Sized>(audio: &mut A, track: Track) -> bool {
    match audio.play(track) {
        Ok(()) => true,
        Err(err) => {
            warn!("Could not play {track:?} track: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muted_never_plays() {
        let mut audio = Muted;
        assert_eq!(audio.play(Track::Background), Err(AudioError::NoDevice));
        assert!(!play_or_warn(&mut audio, Track::Celebration));
    }

    #[test]
    fn errors_read_well() {
        assert_eq!(
            AudioError::Playback("decoder".into()).to_string(),
            "playback failed: decoder"
        );
    }
}
