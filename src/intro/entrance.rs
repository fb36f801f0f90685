use web_time::{Duration, Instant};

use crate::util::easing::EasingFunction;

/// Time-based overlay fade that starts on the first active frame.
///
/// Each call to [`frame`](Self::frame) is independent of frame rate: the
/// result depends only on wall-clock time since the latched start.
#[derive(Debug, Clone)]
pub struct EntranceAnimator {
    duration: Duration,
    easing: EasingFunction,
    start: Option<Instant>,
}

impl EntranceAnimator {
    /// Animator running for `duration` with cubic ease-out.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: EasingFunction::CubicOut,
            start: None,
        }
    }

    /// Compute the overlay opacity for a frame at `now`.
    ///
    /// Inactive frames return `1.0` and forget the start time. Active
    /// frames latch the start time on first use and return
    /// `1 - ease(clamp(elapsed / duration))`, staying at `0.0` once
    /// saturated.
    pub fn frame(&mut self, active: bool, now: Instant) -> f32 {
        if !active {
            self.start = None;
            return 1.0;
        }
        let start = *self.start.get_or_insert(now);
        1.0 - self.easing.evaluate(self.progress_at(start, now))
    }

    fn progress_at(&self, start: Instant, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Linear progress at `now`, or `None` while inactive.
    #[must_use]
    pub fn progress(&self, now: Instant) -> Option<f32> {
        self.start.map(|start| self.progress_at(start, now))
    }

    /// Whether a start time is latched.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE: Duration = Duration::from_millis(700);

    #[test]
    fn inactive_is_opaque() {
        let mut anim = EntranceAnimator::new(FADE);
        let t0 = Instant::now();
        for i in 0..5 {
            assert_eq!(anim.frame(false, t0 + FADE * i), 1.0);
        }
        assert!(!anim.is_running());
    }

    #[test]
    fn first_active_frame_is_opaque_then_fades() {
        let mut anim = EntranceAnimator::new(FADE);
        let t0 = Instant::now();
        assert_eq!(anim.frame(true, t0), 1.0);

        // Halfway: 1 - (1 - (1 - 0.5)^3) = 0.125
        let half = anim.frame(true, t0 + FADE / 2);
        assert!((half - 0.125).abs() < 1e-4, "half = {half}");

        assert_eq!(anim.frame(true, t0 + FADE), 0.0);
        assert_eq!(anim.frame(true, t0 + FADE * 10), 0.0);
    }

    #[test]
    fn opacity_is_non_increasing() {
        let mut anim = EntranceAnimator::new(FADE);
        let t0 = Instant::now();
        let mut last = anim.frame(true, t0);
        // Irregular frame spacing.
        let mut t = t0;
        for step in [3u64, 17, 1, 40, 16, 16, 90, 7, 250, 400, 16] {
            t += Duration::from_millis(step);
            let opacity = anim.frame(true, t);
            assert!(opacity <= last, "{opacity} > {last}");
            assert!((0.0..=1.0).contains(&opacity));
            last = opacity;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn deactivation_restarts_cleanly() {
        let mut anim = EntranceAnimator::new(FADE);
        let t0 = Instant::now();
        let _ = anim.frame(true, t0);
        let _ = anim.frame(true, t0 + FADE);

        assert_eq!(anim.frame(false, t0 + FADE * 2), 1.0);
        assert!(anim.progress(t0 + FADE * 2).is_none());

        let t1 = t0 + FADE * 3;
        assert_eq!(anim.frame(true, t1), 1.0);
        let progress = anim.progress(t1 + FADE / 2).unwrap();
        assert!((progress - 0.5).abs() < 1e-5);
    }

    #[test]
    fn zero_duration_snaps() {
        let mut anim = EntranceAnimator::new(Duration::ZERO);
        assert_eq!(anim.frame(true, Instant::now()), 0.0);
    }
}
