//! The timed intro: typed lines, reveal delay, overlay fade.
//!
//! [`IntroSequencer`] owns the phase machine and its three collaborators
//! ([`TypingSequencer`], [`SceneRevealController`], [`EntranceAnimator`]).
//! It never reads the time itself; the engine feeds it fired timers from the
//! shared [`Clock`] and asks for an [`IntroFrame`] each rendered frame.

mod entrance;
mod phase;
mod reveal;
mod typing;

pub use entrance::EntranceAnimator;
pub use phase::{IntroEvent, IntroPhase};
pub use reveal::SceneRevealController;
pub use typing::{TypingCursor, TypingSequencer};
use web_time::{Duration, Instant};

use crate::clock::{Clock, Fired, FrameTask, Timer};
use crate::options::IntroOptions;

/// What the overlay shows on one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroFrame {
    /// Visible text of every line (partially typed lines are prefixes).
    pub lines: Vec<String>,
    /// Whether the blinking cursor is in its visible half-period.
    pub cursor_visible: bool,
    /// Overlay opacity in `[0, 1]`.
    pub opacity: f32,
    /// Phase at the time of the frame.
    pub phase: IntroPhase,
}

/// Glyph appended to the last line while the cursor is shown.
pub const CURSOR_GLYPH: char = '_';

impl IntroFrame {
    /// Lines joined by newlines, with the cursor on the last line when
    /// visible.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.cursor_visible {
            text.push(CURSOR_GLYPH);
        }
        text
    }
}

/// Drives the intro from key press to a fully faded overlay.
#[derive(Debug, Clone)]
pub struct IntroSequencer {
    phase: IntroPhase,
    typing: TypingSequencer,
    reveal: SceneRevealController,
    entrance: EntranceAnimator,
    tick_interval: Duration,
    cursor_visible: bool,
}

impl IntroSequencer {
    /// Build the sequencer and start the cursor blink on `clock`.
    pub fn new(options: &IntroOptions, clock: &mut Clock, now: Instant) -> Self {
        clock.every(Timer::CursorBlink, options.cursor_blink(), now);
        clock.on_frame(FrameTask::Entrance);
        Self {
            phase: IntroPhase::Idle,
            typing: TypingSequencer::new(options.lines.clone()),
            reveal: SceneRevealController::new(options.reveal_delay()),
            entrance: EntranceAnimator::new(options.fade()),
            tick_interval: options.tick(),
            cursor_visible: true,
        }
    }

    fn transition(&mut self, event: IntroEvent) -> Option<IntroPhase> {
        let next = self.phase.next(event)?;
        log::info!("intro {:?} -> {next:?}", self.phase);
        self.phase = next;
        Some(next)
    }

    /// Start typing. Only the first call has an effect; returns whether this
    /// call started the sequence.
    pub fn start(&mut self, clock: &mut Clock, now: Instant) -> bool {
        if self.transition(IntroEvent::Start).is_none() {
            return false;
        }
        if self.typing.is_complete() {
            self.finish_typing(clock, now);
        } else {
            clock.every(Timer::TypingTick, self.tick_interval, now);
        }
        true
    }

    fn finish_typing(&mut self, clock: &mut Clock, at: Instant) {
        let _ = clock.cancel(Timer::TypingTick);
        let _ = self.transition(IntroEvent::TypingFinished);
        let _ = self.reveal.arm(
            clock,
            self.phase.is_started(),
            self.typing.is_complete(),
            at,
        );
    }

    /// Handle a fired timer. Returns the phase entered as a result, if any.
    pub fn on_timer(
        &mut self,
        fired: Fired,
        clock: &mut Clock,
    ) -> Option<IntroPhase> {
        match fired.timer {
            Timer::TypingTick => {
                if self.phase != IntroPhase::Typing {
                    return None;
                }
                let _ = self.typing.tick();
                if !self.typing.is_complete() {
                    return None;
                }
                self.finish_typing(clock, fired.at);
                Some(self.phase)
            }
            Timer::RevealDelay => {
                if self.reveal.on_elapsed() {
                    self.transition(IntroEvent::RevealElapsed)
                } else {
                    None
                }
            }
            Timer::CursorBlink => {
                self.cursor_visible = !self.cursor_visible;
                None
            }
            Timer::FireworkLaunch => None,
        }
    }

    /// Overlay state for a frame rendered at `now`.
    pub fn frame(&mut self, now: Instant) -> IntroFrame {
        let opacity = self.entrance.frame(self.phase.is_scene_active(), now);
        IntroFrame {
            lines: self
                .typing
                .visible_lines()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            cursor_visible: self.cursor_visible,
            opacity,
            phase: self.phase,
        }
    }

    /// Cancel every intro timer and frame task.
    pub fn teardown(&self, clock: &mut Clock) {
        let _ = clock.cancel(Timer::TypingTick);
        let _ = clock.cancel(Timer::CursorBlink);
        self.reveal.cancel(clock);
        let _ = clock.off_frame(FrameTask::Entrance);
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// The typing sequencer.
    #[must_use]
    pub fn typing(&self) -> &TypingSequencer {
        &self.typing
    }

    /// Whether the cursor is currently shown.
    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn options(lines: &[&str]) -> IntroOptions {
        IntroOptions {
            lines: lines.iter().map(|l| (*l).to_owned()).collect(),
            ..IntroOptions::default()
        }
    }

    /// Drain due timers into the sequencer, returning entered phases.
    fn advance(
        intro: &mut IntroSequencer,
        clock: &mut Clock,
        now: Instant,
    ) -> Vec<IntroPhase> {
        let mut entered = Vec::new();
        while let Some(fired) = clock.pop_due(now) {
            entered.extend(intro.on_timer(fired, clock));
        }
        entered
    }

    #[test]
    fn frame_text_joins_lines_and_cursor() {
        let frame = IntroFrame {
            lines: vec!["> hi".into(), "> th".into()],
            cursor_visible: true,
            opacity: 1.0,
            phase: IntroPhase::Typing,
        };
        assert_eq!(frame.text(), "> hi\n> th_");
        let hidden = IntroFrame {
            cursor_visible: false,
            ..frame
        };
        assert_eq!(hidden.text(), "> hi\n> th");
    }

    #[test]
    fn nothing_types_before_start() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut intro = IntroSequencer::new(&options(&["> ved"]), &mut clock, t0);

        let _ = advance(&mut intro, &mut clock, t0 + ms(5_000));
        let frame = intro.frame(t0 + ms(5_000));
        assert_eq!(frame.phase, IntroPhase::Idle);
        assert_eq!(frame.lines, vec![""]);
        assert_eq!(frame.opacity, 1.0);
    }

    #[test]
    fn one_character_per_tick() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut intro = IntroSequencer::new(&options(&["> ved"]), &mut clock, t0);
        assert!(intro.start(&mut clock, t0));

        let _ = advance(&mut intro, &mut clock, t0 + ms(300));
        assert_eq!(intro.frame(t0 + ms(300)).lines, vec!["> v"]);
        let _ = advance(&mut intro, &mut clock, t0 + ms(399));
        assert_eq!(intro.frame(t0 + ms(399)).lines, vec!["> v"]);
    }

    #[test]
    fn start_is_one_shot() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut intro = IntroSequencer::new(&options(&["ab"]), &mut clock, t0);
        assert!(intro.start(&mut clock, t0));
        let _ = advance(&mut intro, &mut clock, t0 + ms(100));
        assert!(!intro.start(&mut clock, t0 + ms(150)));
        // The second press must not reset the typing tick.
        assert_eq!(clock.deadline(Timer::TypingTick), Some(t0 + ms(200)));
    }

    #[test]
    fn reveal_waits_for_completion_plus_delay() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let lines = ["> ved", "> happy birthday"];
        let mut intro = IntroSequencer::new(&options(&lines), &mut clock, t0);
        let _ = intro.start(&mut clock, t0);

        let ticks = intro.typing().total_ticks() as u64;
        let typed_at = t0 + ms(100 * ticks);

        let entered = advance(&mut intro, &mut clock, typed_at - ms(1));
        assert!(entered.is_empty());
        assert_eq!(intro.phase(), IntroPhase::Typing);
        assert!(!clock.is_scheduled(Timer::RevealDelay));

        let entered = advance(&mut intro, &mut clock, typed_at);
        assert_eq!(entered, vec![IntroPhase::Revealing]);
        assert!(!clock.is_scheduled(Timer::TypingTick));
        assert_eq!(clock.deadline(Timer::RevealDelay), Some(typed_at + ms(1000)));

        let entered = advance(&mut intro, &mut clock, typed_at + ms(999));
        assert!(entered.is_empty());
        assert_eq!(intro.frame(typed_at + ms(999)).opacity, 1.0);

        let entered = advance(&mut intro, &mut clock, typed_at + ms(1000));
        assert_eq!(entered, vec![IntroPhase::Active]);

        let entered = advance(&mut intro, &mut clock, typed_at + ms(60_000));
        assert!(entered.is_empty(), "reveal fired twice");
    }

    #[test]
    fn overlay_fades_after_activation() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut intro = IntroSequencer::new(&options(&["hi"]), &mut clock, t0);
        let _ = intro.start(&mut clock, t0);

        // 3 ticks to finish "hi", then the reveal delay.
        let active_at = t0 + ms(300 + 1000);
        let _ = advance(&mut intro, &mut clock, active_at);
        assert_eq!(intro.phase(), IntroPhase::Active);

        let first = intro.frame(active_at);
        assert_eq!(first.opacity, 1.0);
        assert_eq!(first.lines, vec!["hi"]);
        let mid = intro.frame(active_at + ms(350)).opacity;
        assert!(mid > 0.0 && mid < 0.5);
        assert_eq!(intro.frame(active_at + ms(700)).opacity, 0.0);
        assert_eq!(intro.frame(active_at + ms(5_000)).opacity, 0.0);
    }

    #[test]
    fn empty_lines_go_straight_to_revealing() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut intro = IntroSequencer::new(&options(&[]), &mut clock, t0);
        assert!(intro.start(&mut clock, t0));
        assert_eq!(intro.phase(), IntroPhase::Revealing);
        assert_eq!(clock.deadline(Timer::RevealDelay), Some(t0 + ms(1000)));
    }

    #[test]
    fn cursor_blinks_on_interval() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut intro = IntroSequencer::new(&options(&["x"]), &mut clock, t0);
        assert!(intro.cursor_visible());
        let _ = advance(&mut intro, &mut clock, t0 + ms(500));
        assert!(!intro.cursor_visible());
        let _ = advance(&mut intro, &mut clock, t0 + ms(1000));
        assert!(intro.cursor_visible());
    }

    #[test]
    fn teardown_prevents_reveal() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        let mut intro = IntroSequencer::new(&options(&["x"]), &mut clock, t0);
        let _ = intro.start(&mut clock, t0);
        let _ = advance(&mut intro, &mut clock, t0 + ms(200));
        assert_eq!(intro.phase(), IntroPhase::Revealing);

        intro.teardown(&mut clock);
        assert_eq!(clock.pending(), 0);
        let _ = advance(&mut intro, &mut clock, t0 + ms(10_000));
        assert_eq!(intro.phase(), IntroPhase::Revealing);
    }
}
