//! The single scheduling clock behind every timer and per-frame task.
//!
//! Nothing here reads the system time. Callers pass `now` in and drain due
//! timers with [`Clock::pop_due`], so the same code runs under winit, under
//! `requestAnimationFrame`, and in tests with synthetic instants.
//!
//! Dropping or [`clear`](Clock::clear)ing the clock cancels everything it
//! holds; no callback can outlive its owner.

use web_time::{Duration, Instant};

/// Shortest repeating interval. A zero interval would fire forever within
/// a single [`Clock::pop_due`] drain.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Named timers. At most one of each is scheduled at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Reveals the next character of the typed intro.
    TypingTick,
    /// One-shot delay between typing completion and the scene reveal.
    RevealDelay,
    /// Toggles the overlay cursor.
    CursorBlink,
    /// Launches a firework burst.
    FireworkLaunch,
}

/// Work that runs once per rendered frame while registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTask {
    /// Overlay fade driven by the entrance animator.
    Entrance,
    /// Card lift toward or away from the active pose.
    CardMotion,
    /// Particle integration.
    Fireworks,
    /// Orbit damping.
    CameraDamping,
}

/// A timer that came due, stamped with its scheduled deadline.
///
/// Follow-up timers should be scheduled from `at` rather than from the
/// frame time so that chains stay exact regardless of frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    /// Which timer fired.
    pub timer: Timer,
    /// The deadline it was scheduled for.
    pub at: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    timer: Timer,
    deadline: Instant,
    period: Option<Duration>,
    /// Insertion order, used to break deadline ties.
    seq: u64,
}

/// Cancellable one-shot and repeating timers plus per-frame registrations.
#[derive(Debug, Default)]
pub struct Clock {
    scheduled: Vec<Scheduled>,
    frame_tasks: Vec<FrameTask>,
    next_seq: u64,
}

impl Clock {
    /// Create an empty clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `timer` to fire once at `from + delay`. Re-arming a timer
    /// that is already scheduled replaces it.
    pub fn after(&mut self, timer: Timer, delay: Duration, from: Instant) {
        self.insert(timer, from + delay, None);
    }

    /// Schedule `timer` to fire every `interval`, first at
    /// `from + interval`. Replaces any existing schedule for `timer`.
    pub fn every(&mut self, timer: Timer, interval: Duration, from: Instant) {
        let interval = interval.max(MIN_INTERVAL);
        self.insert(timer, from + interval, Some(interval));
    }

    fn insert(
        &mut self,
        timer: Timer,
        deadline: Instant,
        period: Option<Duration>,
    ) {
        self.scheduled.retain(|s| s.timer != timer);
        let seq = self.bump_seq();
        self.scheduled.push(Scheduled {
            timer,
            deadline,
            period,
            seq,
        });
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Cancel `timer`. Returns `true` if it was scheduled.
    pub fn cancel(&mut self, timer: Timer) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.timer != timer);
        self.scheduled.len() != before
    }

    /// Whether `timer` is currently scheduled.
    #[must_use]
    pub fn is_scheduled(&self, timer: Timer) -> bool {
        self.scheduled.iter().any(|s| s.timer == timer)
    }

    /// Next deadline of `timer`, if scheduled.
    #[must_use]
    pub fn deadline(&self, timer: Timer) -> Option<Instant> {
        self.scheduled
            .iter()
            .find(|s| s.timer == timer)
            .map(|s| s.deadline)
    }

    /// Number of scheduled timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.scheduled.len()
    }

    /// Remove and return the earliest timer due at `now`.
    ///
    /// Ties resolve in schedule order. Repeating timers re-arm from their
    /// own deadline, so a frame that arrives three intervals late drains
    /// three firings.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired> {
        let idx = self
            .scheduled
            .iter()
            .enumerate()
            .filter(|(_, s)| s.deadline <= now)
            .min_by_key(|(_, s)| (s.deadline, s.seq))
            .map(|(i, _)| i)?;

        let entry = self.scheduled[idx];
        let fired = Fired {
            timer: entry.timer,
            at: entry.deadline,
        };

        if let Some(period) = entry.period {
            let seq = self.bump_seq();
            let slot = &mut self.scheduled[idx];
            slot.deadline += period;
            slot.seq = seq;
        } else {
            let _ = self.scheduled.swap_remove(idx);
        }

        Some(fired)
    }

    /// Register `task` to run every frame. Idempotent.
    pub fn on_frame(&mut self, task: FrameTask) {
        if !self.frame_tasks.contains(&task) {
            self.frame_tasks.push(task);
        }
    }

    /// Unregister `task`. Returns `true` if it was registered.
    pub fn off_frame(&mut self, task: FrameTask) -> bool {
        let before = self.frame_tasks.len();
        self.frame_tasks.retain(|t| *t != task);
        self.frame_tasks.len() != before
    }

    /// Whether `task` runs on frames.
    #[must_use]
    pub fn runs_on_frame(&self, task: FrameTask) -> bool {
        self.frame_tasks.contains(&task)
    }

    /// Registered frame tasks in registration order.
    #[must_use]
    pub fn frame_tasks(&self) -> &[FrameTask] {
        &self.frame_tasks
    }

    /// Cancel every timer and frame task.
    pub fn clear(&mut self) {
        self.scheduled.clear();
        self.frame_tasks.clear();
    }
}
