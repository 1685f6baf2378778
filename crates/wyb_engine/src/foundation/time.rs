//! Frame timing

use std::time::{Duration, Instant};

/// Wall-clock frame timer
#[derive(Debug)]
pub struct Timer {
    last_frame: Instant,
    max_step: Duration,
    total: Duration,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Longest step handed out by default
    pub const DEFAULT_MAX_STEP: Duration = Duration::from_millis(250);

    /// Create a new timer starting now
    pub fn new() -> Self {
        Self::with_max_step(Self::DEFAULT_MAX_STEP)
    }

    /// Create a timer that clamps each step to `max_step`
    pub fn with_max_step(max_step: Duration) -> Self {
        Self {
            last_frame: Instant::now(),
            max_step,
            total: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Time since the previous tick, clamped (call once per frame)
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).min(self.max_step);
        self.last_frame = now;
        self.total += elapsed;
        self.frame_count += 1;
        elapsed
    }

    /// Sum of every step handed out
    pub const fn total(&self) -> Duration {
        self.total
    }

    /// Number of ticks so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        let seconds = self.total.as_secs_f32();
        if seconds > 0.0 {
            self.frame_count as f32 / seconds
        } else {
            0.0
        }
    }
}
