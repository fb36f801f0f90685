use web_time::{Duration, Instant};

use crate::clock::{Clock, Timer};

/// One-shot delay between typing completion and scene activation.
///
/// Arms [`Timer::RevealDelay`] at most once per session. The flag only
/// flips when that timer fires, and [`cancel`](Self::cancel) removes a
/// pending timer so a torn-down intro never activates.
#[derive(Debug, Clone)]
pub struct SceneRevealController {
    delay: Duration,
    armed: bool,
    scene_active: bool,
}

impl SceneRevealController {
    /// Controller that waits `delay` after arming.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            armed: false,
            scene_active: false,
        }
    }

    /// Arm the reveal timer from `from`.
    ///
    /// Does nothing unless the sequence was `started` and typing is
    /// `typing_complete`, or if the controller was armed before. Returns
    /// whether the timer was armed by this call.
    pub fn arm(
        &mut self,
        clock: &mut Clock,
        started: bool,
        typing_complete: bool,
        from: Instant,
    ) -> bool {
        if self.armed || !started || !typing_complete {
            return false;
        }
        self.armed = true;
        clock.after(Timer::RevealDelay, self.delay, from);
        log::debug!("scene reveal armed ({:?})", self.delay);
        true
    }

    /// Handle the reveal timer firing. Returns `true` on the activating
    /// call; repeated or unarmed calls return `false`.
    pub fn on_elapsed(&mut self) -> bool {
        if !self.armed || self.scene_active {
            return false;
        }
        self.scene_active = true;
        true
    }

    /// Cancel a pending reveal. An already active scene stays active.
    pub fn cancel(&self, clock: &mut Clock) {
        if clock.cancel(Timer::RevealDelay) {
            log::debug!("pending scene reveal cancelled");
        }
    }

    /// Whether the timer has been armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Whether the scene has been activated.
    #[must_use]
    pub fn is_scene_active(&self) -> bool {
        self.scene_active
    }

    /// Configured delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1000);

    #[test]
    fn does_not_arm_before_completion_or_start() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut reveal = SceneRevealController::new(DELAY);

        assert!(!reveal.arm(&mut clock, true, false, t0));
        assert!(!reveal.arm(&mut clock, false, true, t0));
        assert!(!clock.is_scheduled(Timer::RevealDelay));
    }

    #[test]
    fn arms_exactly_once() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut reveal = SceneRevealController::new(DELAY);

        assert!(reveal.arm(&mut clock, true, true, t0));
        assert!(!reveal.arm(&mut clock, true, true, t0 + DELAY / 2));
        assert_eq!(clock.deadline(Timer::RevealDelay), Some(t0 + DELAY));
    }

    #[test]
    fn fires_after_delay_once() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut reveal = SceneRevealController::new(DELAY);
        let _ = reveal.arm(&mut clock, true, true, t0);

        assert!(clock.pop_due(t0 + DELAY - Duration::from_millis(1)).is_none());
        let fired = clock.pop_due(t0 + DELAY).unwrap();
        assert_eq!(fired.timer, Timer::RevealDelay);
        assert!(reveal.on_elapsed());
        assert!(!reveal.on_elapsed());
        assert!(reveal.is_scene_active());
    }

    #[test]
    fn unarmed_elapse_is_ignored() {
        let mut reveal = SceneRevealController::new(DELAY);
        assert!(!reveal.on_elapsed());
        assert!(!reveal.is_scene_active());
    }

    #[test]
    fn cancel_removes_pending_timer() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut reveal = SceneRevealController::new(DELAY);
        let _ = reveal.arm(&mut clock, true, true, t0);

        reveal.cancel(&mut clock);
        assert!(clock.pop_due(t0 + DELAY * 3).is_none());
        assert!(!reveal.is_scene_active());
    }
}
