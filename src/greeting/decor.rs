//! Short-lived decorative glyphs layered over the page.

use std::time::Duration;

use rand::Rng;

use crate::system::Viewport;

pub const PETALS: usize = 20;
pub const FLOATING_HEARTS: usize = 25;
pub const BURST: usize = 20;
/// Gap between background hearts.
pub const BACKGROUND_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    pub x: f32,
    pub y: f32,
    /// Multiple of the page font size.
    pub scale: f32,
    pub opacity: f32,
    /// Degrees.
    pub hue_shift: f32,
    /// Time from scheduling until it appears.
    pub delay: Duration,
    /// Time from appearing until it starts fading out.
    pub visible_for: Duration,
    pub fade_for: Duration,
}

impl Decoration {
    fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            scale: 1.0,
            opacity: 1.0,
            hue_shift: 0.0,
            delay: Duration::ZERO,
            visible_for: Duration::ZERO,
            fade_for: Duration::ZERO,
        }
    }

    /// Time from scheduling until it is gone.
    pub fn lifetime(&self) -> Duration {
        self.delay + self.visible_for + self.fade_for
    }
}

fn seconds<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Duration {
    Duration::from_secs_f32(rng.gen_range(min..max))
}

/// A faint heart rising from just below the bottom edge.
pub fn background_heart<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Decoration {
    Decoration {
        scale: rng.gen_range(1.0..2.5),
        opacity: rng.gen_range(0.2..0.5),
        visible_for: Duration::from_secs(4),
        ..Decoration::at(
            rng.gen_range(0.0..=viewport.width as f32),
            viewport.height as f32 + 50.0,
        )
    }
}

/// Petals drifting down from above the top edge, one every 100ms.
pub fn rose_petals<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Vec<Decoration> {
    (0..PETALS)
        .map(|i| {
            let stagger = Duration::from_millis(100 * i as u64);
            let hold = seconds(rng, 0.0, 2.0);
            let fall = seconds(rng, 4.0, 7.0);
            Decoration {
                scale: rng.gen_range(1.0..2.5),
                opacity: rng.gen_range(0.3..0.8),
                delay: stagger + hold,
                // Removed 7s after insertion whether or not the fall finished.
                visible_for: fall.min(Duration::from_secs(7).saturating_sub(hold)),
                ..Decoration::at(rng.gen_range(0.0..=viewport.width as f32), -50.0)
            }
        })
        .collect()
}

/// Hearts floating up from the bottom edge, one every 80ms.
pub fn floating_hearts<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Vec<Decoration> {
    (0..FLOATING_HEARTS)
        .map(|i| Decoration {
            scale: rng.gen_range(1.5..3.5),
            hue_shift: rng.gen_range(0.0..60.0),
            delay: Duration::from_millis(80 * i as u64),
            visible_for: Duration::from_secs(4),
            ..Decoration::at(
                rng.gen_range(0.0..=viewport.width as f32),
                viewport.height as f32,
            )
        })
        .collect()
}

/// Sparkles popping up anywhere on screen, one every 120ms.
pub fn celebration_burst<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Vec<Decoration> {
    (0..BURST)
        .map(|i| Decoration {
            scale: rng.gen_range(2.0..4.0),
            delay: Duration::from_millis(120 * i as u64),
            visible_for: Duration::from_secs(1),
            fade_for: Duration::from_millis(500),
            ..Decoration::at(
                rng.gen_range(0.0..=viewport.width as f32),
                rng.gen_range(0.0..=viewport.height as f32),
            )
        })
        .collect()
}
