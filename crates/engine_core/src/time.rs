//! Time management for the fixed-rate frame loop.

use std::time::{Duration, Instant};

/// Default simulation rate. One tick = one frame.
pub const TICK_RATE_HZ: f64 = 60.0;

/// Manages frame timing, tick counting and the per-frame wait.
#[derive(Debug)]
pub struct Time {
    /// Time when the engine started.
    start_time: Instant,
    /// Time the current frame started.
    frame_start: Instant,
    /// Duration of the last frame, including the wait.
    delta: Duration,
    /// Ticks completed since start.
    tick_count: u64,
    /// Budget for one tick.
    tick_budget: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager ticking at [`TICK_RATE_HZ`].
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            frame_start: now,
            delta: Duration::ZERO,
            tick_count: 0,
            tick_budget: Duration::from_secs_f64(1.0 / TICK_RATE_HZ),
        }
    }

    /// Monotonic milliseconds since the engine started.
    pub fn now_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Block until the current tick's budget is spent, then start the next tick.
    ///
    /// Frames that overrun their budget are not caught up; the next tick simply
    /// starts late, the same way a capped frame clock behaves.
    pub fn wait_for_tick(&mut self) {
        let spent = self.frame_start.elapsed();
        if let Some(remaining) = self.tick_budget.checked_sub(spent) {
            std::thread::sleep(remaining);
        }
        let now = Instant::now();
        self.delta = now - self.frame_start;
        self.frame_start = now;
        self.tick_count += 1;
    }

    /// Get the current tick count.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

/// Number of whole ticks that cover `ms` milliseconds at [`TICK_RATE_HZ`].
pub fn ticks_for_ms(ms: u64) -> u32 {
    ((ms as f64 / 1000.0) * TICK_RATE_HZ).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_seconds_is_120_ticks() {
        assert_eq!(ticks_for_ms(2000), 120);
        assert_eq!(ticks_for_ms(1000), 60);
    }

    #[test]
    fn wait_for_tick_counts_and_paces() {
        let mut time = Time::new();
        time.wait_for_tick();
        time.wait_for_tick();
        assert_eq!(time.tick_count(), 2);
        // Each tick lasts at least 1/60 s, so the rate never exceeds 60.
        assert!(time.fps() > 0.0 && time.fps() <= 60.5);
        assert!(time.now_ms() >= 33);
    }
}
