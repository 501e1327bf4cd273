//! Wall-clock to animation time for the UI loop.
//!
//! The loop blocks while nothing moves.  Time spent blocked is not
//! animation time: the first frame after an idle wait advances by at most
//! one frame, so a fade or glide started by the waking input plays in full.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame: Duration,
    idle: bool,
}

impl FrameClock {
    pub fn new(now: Instant, frame: Duration) -> Self {
        Self {
            last: now,
            frame,
            idle: false,
        }
    }

    /// Mark that the loop is about to wait with nothing animating.
    pub fn idle(&mut self) {
        self.idle = true;
    }

    /// Animation time since the previous tick.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        if std::mem::take(&mut self.idle) {
            elapsed.min(self.frame)
        } else {
            elapsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn busy_ticks_report_real_time() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0, FRAME);
        assert_eq!(clock.tick(t0 + Duration::from_millis(20)), Duration::from_millis(20));
        assert_eq!(clock.tick(t0 + Duration::from_millis(36)), FRAME);
    }

    #[test]
    fn idle_gap_counts_as_one_frame() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0, FRAME);
        clock.idle();
        assert_eq!(clock.tick(t0 + Duration::from_millis(250)), FRAME);
        // Only the tick right after the wait is capped.
        assert_eq!(
            clock.tick(t0 + Duration::from_millis(290)),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn short_idle_is_not_stretched() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0, FRAME);
        clock.idle();
        assert_eq!(clock.tick(t0 + Duration::from_millis(5)), Duration::from_millis(5));
    }
}
