//! Frame delta and FPS tracking.

use web_time::{Duration, Instant};

/// Longest step handed to the simulation. A backgrounded tab can stall the
/// frame loop for seconds; particles integrate this much at most.
const MAX_STEP: Duration = Duration::from_millis(100);

/// Per-frame delta tracking with a smoothed FPS estimate.
pub struct FrameTiming {
    /// Timestamp of the previous frame, `None` before the first frame.
    last_frame: Option<Instant>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a frame timer with no frames recorded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: None,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Record a frame at `now` and return the simulation step since the
    /// previous one, clamped to [`MAX_STEP`]. The first frame yields zero.
    pub fn begin_frame(&mut self, now: Instant) -> Duration {
        let Some(last) = self.last_frame.replace(now) else {
            return Duration::ZERO;
        };
        let elapsed = now.saturating_duration_since(last);

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        elapsed.min(MAX_STEP)
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}
