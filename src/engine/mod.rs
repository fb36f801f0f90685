//! The greeting engine: intro, room, cards, fireworks and camera behind one
//! clock.
//!
//! The engine holds no GPU state. Front ends feed it input and the current
//! time, call [`GreetingEngine::update`] once per frame, and hand the
//! result to a [`SceneRenderer`](crate::renderer::SceneRenderer).

mod accessors;
pub mod command;
mod input;

use web_time::{Duration, Instant};

use crate::audio::MusicPlayer;
use crate::camera::{rig, OrbitController};
use crate::clock::{Clock, FrameTask, Timer};
use crate::input::InputProcessor;
use crate::intro::{IntroFrame, IntroPhase, IntroSequencer};
use crate::options::Options;
use crate::scene::{Fireworks, Scene};
use crate::selection::CardSelection;
use crate::util::frame_timing::FrameTiming;

/// Output of one [`GreetingEngine::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    /// What the text overlay shows.
    pub overlay: IntroFrame,
    /// Time since the previous frame, clamped.
    pub dt: Duration,
}

/// Owns every piece of greeting state and the single [`Clock`] that drives
/// it.
///
/// # Frame loop
///
/// Forward input with [`handle_input`](Self::handle_input) and
/// [`handle_key_press`](Self::handle_key_press), call
/// [`update`](Self::update) each frame, and [`resize`](Self::resize) when
/// the surface changes. [`teardown`](Self::teardown) cancels every timer
/// and frame task.
pub struct GreetingEngine {
    options: Options,
    clock: Clock,
    intro: IntroSequencer,
    selection: CardSelection,
    scene: Scene,
    fireworks: Fireworks,
    camera: OrbitController,
    input: InputProcessor,
    music: Box<dyn MusicPlayer>,
    frame_timing: FrameTiming,
    /// Last overlay computed by the entrance frame task.
    overlay: IntroFrame,
    /// Surface size in physical pixels.
    viewport: (u32, u32),
    /// Music was playing when the page was hidden into the back-forward
    /// cache.
    resume_music: bool,
}

impl GreetingEngine {
    /// Build the engine. The cursor blink starts immediately; nothing else
    /// happens until [`GreetingCommand::Start`](command::GreetingCommand::Start).
    #[must_use]
    pub fn new(
        options: Options,
        viewport: (u32, u32),
        music: Box<dyn MusicPlayer>,
        now: Instant,
    ) -> Self {
        let mut clock = Clock::new();
        let mut intro = IntroSequencer::new(&options.intro, &mut clock, now);
        let overlay = intro.frame(now);
        let (width, height) = (viewport.0.max(1), viewport.1.max(1));
        let camera = rig::mount(&options.camera, width as f32 / height as f32);

        Self {
            clock,
            intro,
            selection: CardSelection::new(),
            scene: Scene::new(&options.scene),
            fireworks: Fireworks::new(&options.fireworks),
            camera,
            input: InputProcessor::with_key_bindings(options.keybindings.clone()),
            music,
            frame_timing: FrameTiming::new(),
            overlay,
            viewport: (width, height),
            resume_music: false,
            options,
        }
    }

    /// Advance everything to `now`: fire due timers, then run frame tasks.
    pub fn update(&mut self, now: Instant) -> FrameState {
        let dt = self.frame_timing.begin_frame(now);
        self.drain_timers(now);

        for task in self.clock.frame_tasks().to_vec() {
            self.run_frame_task(task, dt, now);
        }

        FrameState {
            overlay: self.overlay.clone(),
            dt,
        }
    }

    fn drain_timers(&mut self, now: Instant) {
        while let Some(fired) = self.clock.pop_due(now) {
            log::trace!("{:?} fired", fired.timer);
            match fired.timer {
                Timer::FireworkLaunch => self.fireworks.launch(),
                Timer::TypingTick | Timer::RevealDelay | Timer::CursorBlink => {
                    let entered = self.intro.on_timer(fired, &mut self.clock);
                    if entered == Some(IntroPhase::Active) {
                        self.begin_fireworks(fired.at);
                    }
                }
            }
        }
    }

    fn begin_fireworks(&mut self, at: Instant) {
        log::debug!("scene revealed, fireworks start");
        self.clock
            .every(Timer::FireworkLaunch, self.options.fireworks.launch_interval(), at);
        self.clock.on_frame(FrameTask::Fireworks);
        self.fireworks.launch();
    }

    fn run_frame_task(&mut self, task: FrameTask, dt: Duration, now: Instant) {
        match task {
            FrameTask::Entrance => self.overlay = self.intro.frame(now),
            FrameTask::CardMotion => {
                let active = self.selection.active();
                if !self.scene.update_cards(dt, active) {
                    let _ = self.clock.off_frame(FrameTask::CardMotion);
                }
            }
            FrameTask::Fireworks => self.fireworks.update(dt),
            FrameTask::CameraDamping => {
                if !self.camera.update(dt) {
                    let _ = self.clock.off_frame(FrameTask::CameraDamping);
                }
            }
        }
    }

    /// Update the viewport after a surface resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.resize(width, height);
    }

    /// Cancel every timer and frame task and stop the music. The engine
    /// stays readable but nothing advances afterwards.
    pub fn teardown(&mut self) {
        self.intro.teardown(&mut self.clock);
        self.clock.clear();
        self.fireworks.clear();
        self.music.stop();
        log::debug!("greeting torn down");
    }

    /// The page was hidden. A page kept for the back-forward cache
    /// (`persisted`) only pauses the music; otherwise the engine is torn
    /// down.
    pub fn page_hidden(&mut self, persisted: bool) {
        if persisted {
            self.resume_music = self.music.is_playing();
            self.music.stop();
            log::debug!("page cached; music paused");
        } else {
            self.teardown();
        }
    }

    /// The page was shown again. Restores music paused by
    /// [`page_hidden`](Self::page_hidden) when restored from the cache.
    pub fn page_shown(&mut self, persisted: bool) {
        if persisted && std::mem::take(&mut self.resume_music) {
            self.music.play();
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::command::GreetingCommand;
    use super::*;
    use crate::audio::SilentPlayer;
    use crate::input::{InputEvent, MouseButton};

    const VIEWPORT: (u32, u32) = (800, 600);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn engine(t0: Instant) -> GreetingEngine {
        let mut options = Options::default();
        options.intro.lines = vec!["> hey".into(), "> ved".into()];
        options.fireworks.seed = Some(1);
        let music = Box::new(SilentPlayer::new(&options.audio));
        GreetingEngine::new(options, VIEWPORT, music, t0)
    }

    /// Pixel position of a world point under the current camera.
    fn screen_pos(engine: &GreetingEngine, world: Vec3) -> Vec2 {
        let clip = engine.camera().build_matrix().project_point3(world);
        Vec2::new(
            (clip.x + 1.0) * 0.5 * VIEWPORT.0 as f32,
            (1.0 - clip.y) * 0.5 * VIEWPORT.1 as f32,
        )
    }

    fn click(engine: &mut GreetingEngine, at: Vec2, now: Instant) -> bool {
        let _ = engine.handle_input(InputEvent::CursorMoved { x: at.x, y: at.y }, now);
        let changed = engine.handle_input(
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            },
            now,
        );
        let _ = engine.handle_input(
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            },
            now,
        );
        changed
    }

    /// Step the engine in 16ms frames up to `until`.
    fn run_until(engine: &mut GreetingEngine, from: Instant, until: Instant) -> FrameState {
        let mut t = from;
        let mut state = engine.update(t);
        while t < until {
            t = (t + ms(16)).min(until);
            state = engine.update(t);
        }
        state
    }

    #[test]
    fn end_to_end_greeting() {
        let t0 = Instant::now();
        let mut engine = engine(t0);

        // Idle until the key press.
        let state = engine.update(t0 + ms(2_000));
        assert_eq!(state.overlay.phase, IntroPhase::Idle);
        assert_eq!(state.overlay.lines, vec!["", ""]);

        let start = t0 + ms(2_000);
        assert!(engine.handle_key_press("Space", start));
        assert!(engine.is_music_playing());
        assert!(!engine.handle_key_press("Space", start + ms(50)));

        // One character every 100ms.
        let state = engine.update(start + ms(300));
        assert_eq!(state.overlay.lines, vec!["> h", ""]);
        assert_eq!(state.overlay.phase, IntroPhase::Typing);

        // "> hey" and "> ved" take 6 ticks each.
        let typed = start + ms(1_200);
        let state = engine.update(typed);
        assert_eq!(state.overlay.lines, vec!["> hey", "> ved"]);
        assert_eq!(state.overlay.phase, IntroPhase::Revealing);
        assert_eq!(state.overlay.opacity, 1.0);

        let state = engine.update(typed + ms(999));
        assert_eq!(state.overlay.phase, IntroPhase::Revealing);

        // Reveal, then a 700ms cubic ease-out fade.
        let revealed = typed + ms(1_000);
        let state = engine.update(revealed);
        assert_eq!(state.overlay.phase, IntroPhase::Active);
        assert_eq!(state.overlay.opacity, 1.0);
        assert!(!engine.fireworks().is_empty());

        let mid = engine.update(revealed + ms(350)).overlay.opacity;
        assert!((mid - 0.125).abs() < 1e-3, "opacity {mid}");
        let state = run_until(&mut engine, revealed + ms(350), revealed + ms(700));
        assert_eq!(state.overlay.opacity, 0.0);

        // Click card-1, then empty space.
        let now = revealed + ms(800);
        let card = engine.scene().cards()[0].descriptor().position;
        let at = screen_pos(&engine, card);
        assert!(click(&mut engine, at, now));
        assert_eq!(engine.active_card(), Some("card-1"));
        let _ = run_until(&mut engine, now, now + ms(600));
        assert_eq!(engine.scene().cards()[0].lift(), 1.0);

        let now = now + ms(600);
        assert!(click(&mut engine, Vec2::new(400.0, 5.0), now));
        assert_eq!(engine.active_card(), None);
    }

    #[test]
    fn cards_ignore_clicks_before_reveal() {
        let t0 = Instant::now();
        let mut engine = engine(t0);
        let card = engine.scene().cards()[1].descriptor().position;
        let at = screen_pos(&engine, card);
        assert!(!click(&mut engine, at, t0));
        assert_eq!(engine.active_card(), None);
    }

    #[test]
    fn clicking_the_active_card_puts_it_back() {
        let t0 = Instant::now();
        let mut engine = engine(t0);
        let _ = engine.handle_key_press("Space", t0);
        let _ = engine.update(t0 + ms(5_000));
        assert_eq!(engine.phase(), IntroPhase::Active);

        let now = t0 + ms(5_000);
        let at = screen_pos(&engine, engine.scene().cards()[2].descriptor().position);
        assert!(click(&mut engine, at, now));
        assert_eq!(engine.active_card(), Some("card-3"));
        let at = screen_pos(&engine, engine.scene().cards()[1].descriptor().position);
        assert!(click(&mut engine, at, now));
        assert_eq!(engine.active_card(), Some("card-2"));
        assert!(engine.execute(
            GreetingCommand::ToggleCard {
                id: "card-2".into()
            },
            now
        ));
        assert_eq!(engine.active_card(), None);
        assert!(!engine.execute(
            GreetingCommand::ToggleCard { id: "nope".into() },
            now
        ));
    }

    #[test]
    fn drag_orbits_after_reveal() {
        let t0 = Instant::now();
        let mut engine = engine(t0);
        let _ = engine.handle_key_press("Space", t0);
        let _ = engine.update(t0 + ms(5_000));
        let eye = engine.camera().eye;

        let now = t0 + ms(5_000);
        let _ = click(&mut engine, Vec2::new(400.0, 5.0), now);
        let _ = engine.handle_input(InputEvent::CursorMoved { x: 400.0, y: 5.0 }, now);
        let _ = engine.handle_input(
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            },
            now,
        );
        assert!(engine.handle_input(InputEvent::CursorMoved { x: 300.0, y: 5.0 }, now));
        let _ = run_until(&mut engine, now, now + ms(3_000));
        assert!(engine.camera().eye.distance(eye) > 0.1);
    }

    #[test]
    fn teardown_stops_everything() {
        let t0 = Instant::now();
        let mut engine = engine(t0);
        let _ = engine.handle_key_press("Space", t0);
        let _ = engine.update(t0 + ms(300));
        engine.teardown();
        assert!(!engine.is_music_playing());

        let before = engine.update(t0 + ms(300)).overlay;
        let after = engine.update(t0 + ms(60_000)).overlay;
        assert_eq!(before, after);
        assert_eq!(after.phase, IntroPhase::Typing);
    }

    #[test]
    fn cached_page_keeps_running_after_restore() {
        let t0 = Instant::now();
        let mut engine = engine(t0);
        let _ = engine.handle_key_press("Space", t0);
        let _ = engine.update(t0 + ms(100));

        engine.page_hidden(true);
        assert!(!engine.is_music_playing());
        engine.page_shown(true);
        assert!(engine.is_music_playing());

        let frame = engine.update(t0 + ms(5_000));
        assert_eq!(frame.overlay.phase, IntroPhase::Active);
    }

    #[test]
    fn unloading_page_tears_down() {
        let t0 = Instant::now();
        let mut engine = engine(t0);
        let _ = engine.handle_key_press("Space", t0);
        engine.page_hidden(false);
        engine.page_shown(false);
        assert!(!engine.is_music_playing());
        let frame = engine.update(t0 + ms(5_000));
        assert_eq!(frame.overlay.phase, IntroPhase::Typing);
    }
}
