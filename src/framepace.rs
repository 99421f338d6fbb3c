use std::time::{Duration, Instant};

/// Stands in for a display refresh: holds each frame to a fixed period.
pub struct FramePacer {
    period: Option<Duration>,
    frame_start: Instant,
    last_frametime: Duration,
    frames: u64,
    started: Instant,
}

impl FramePacer {
    /// A `framerate` of 0 runs unpaced.
    pub fn new(framerate: u32) -> Self {
        let now = Instant::now();
        Self {
            period: (framerate > 0).then(|| Duration::from_nanos(1_000_000_000 / framerate as u64)),
            frame_start: now,
            last_frametime: Duration::ZERO,
            frames: 0,
            started: now,
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Duration of the last completed frame, including any wait.
    pub fn frametime(&self) -> Duration {
        self.last_frametime
    }

    pub fn average_framerate(&self) -> f32 {
        let elapsed = self.started.elapsed().as_secs_f32();
        if elapsed > 0.0 {
            self.frames as f32 / elapsed
        } else {
            0.0
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    pub fn end_frame(&mut self) {
        if let Some(period) = self.period {
            const ACCURACY: Duration = Duration::from_micros(100);

            if let Some(sleep_time) = period
                .checked_sub(self.frame_start.elapsed())
                .and_then(|remaining| remaining.checked_sub(ACCURACY))
            {
                std::thread::sleep(sleep_time);
            }

            while self.frame_start.elapsed() < period {
                std::thread::yield_now();
            }
        }

        self.last_frametime = self.frame_start.elapsed();
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_framerate_is_unpaced() {
        let mut pacer = FramePacer::new(0);
        assert_eq!(pacer.period(), None);

        pacer.begin_frame();
        pacer.end_frame();
        assert_eq!(pacer.frames(), 1);
    }

    #[test]
    fn paced_frames_last_at_least_one_period() {
        let mut pacer = FramePacer::new(200);
        assert_eq!(pacer.period(), Some(Duration::from_millis(5)));

        for _ in 0..3 {
            pacer.begin_frame();
            pacer.end_frame();
            assert!(pacer.frametime() >= Duration::from_millis(5));
        }
        assert_eq!(pacer.frames(), 3);
    }
}
