//! Input and command execution for [`GreetingEngine`].

use web_time::Instant;

use super::command::GreetingCommand;
use super::GreetingEngine;
use crate::clock::FrameTask;
use crate::input::{InputEvent, MouseButton};

impl GreetingEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Consumers forward raw window or DOM events as [`InputEvent`]
    /// variants; the input processor turns them into commands which are
    /// executed immediately.
    ///
    /// Returns `true` if the event changed any state.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        let hovered = match event {
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            } => self.hovered_card().map(str::to_owned),
            _ => None,
        };
        self.input
            .handle_event(event, hovered.as_deref())
            .is_some_and(|cmd| self.execute(cmd, now))
    }

    /// Handle a key press identified by its `KeyboardEvent.code` string.
    ///
    /// Returns `true` if the bound command changed any state.
    pub fn handle_key_press(&mut self, code: &str, now: Instant) -> bool {
        self.input
            .handle_key_press(code)
            .is_some_and(|cmd| self.execute(cmd, now))
    }

    /// Execute a command. Returns `true` if it changed any state.
    ///
    /// Card and camera commands are ignored until the scene is revealed.
    pub fn execute(&mut self, command: GreetingCommand, now: Instant) -> bool {
        let scene_active = self.intro.phase().is_scene_active();
        match command {
            GreetingCommand::Start => {
                if !self.intro.start(&mut self.clock, now) {
                    return false;
                }
                self.music.play();
                true
            }
            GreetingCommand::ToggleCard { id } => {
                if !scene_active || !self.scene.has_card(&id) {
                    return false;
                }
                let _ = self.selection.toggle(&id);
                self.clock.on_frame(FrameTask::CardMotion);
                true
            }
            GreetingCommand::ClearSelection => {
                let changed = self.selection.clear();
                if changed {
                    self.clock.on_frame(FrameTask::CardMotion);
                }
                changed
            }
            GreetingCommand::RotateCamera { delta } => {
                if !scene_active {
                    return false;
                }
                self.camera.rotate(delta);
                self.clock.on_frame(FrameTask::CameraDamping);
                true
            }
            GreetingCommand::Zoom { delta } => {
                if !scene_active {
                    return false;
                }
                self.camera.zoom(delta);
                self.clock.on_frame(FrameTask::CameraDamping);
                true
            }
        }
    }
}
