//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! button held) and the key-binding map. It is the only thing that sits
//! between raw window or DOM events and the engine's
//! [`execute`](crate::GreetingEngine::execute) method.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use super::mouse::PointerState;
use crate::engine::command::GreetingCommand;
use crate::options::KeybindingOptions;

/// Converts raw input events into [`GreetingCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event, engine.hovered_card()) {
///     engine.execute(cmd, now);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("Space") {
///     engine.execute(cmd, now);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    pointer: PointerState,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Last cursor position in physical pixels, if the cursor has moved.
    #[must_use]
    pub fn cursor(&self) -> Option<Vec2> {
        self.pointer.position
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.pointer.pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<GreetingCommand> {
        self.key_bindings.lookup(key).map(|action| match action {
            KeyAction::Start => GreetingCommand::Start,
            KeyAction::ClearSelection => GreetingCommand::ClearSelection,
        })
    }

    /// Process a raw input event and return zero or one commands.
    ///
    /// `hovered` is the card under the cursor; it only matters for a
    /// primary-button press, which toggles that card or, over empty space,
    /// clears the selection.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        hovered: Option<&str>,
    ) -> Option<GreetingCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let delta = self.pointer.move_to(Vec2::new(x, y));
                (self.pointer.pressed && delta != Vec2::ZERO)
                    .then_some(GreetingCommand::RotateCamera { delta })
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            } => {
                self.pointer.press();
                Some(match hovered {
                    Some(id) => GreetingCommand::ToggleCard { id: id.to_owned() },
                    None => GreetingCommand::ClearSelection,
                })
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            }
            | InputEvent::CursorLeft => {
                self.pointer.release();
                None
            }
            InputEvent::MouseButton { .. } => None,
            InputEvent::Scroll { delta } => Some(GreetingCommand::Zoom { delta }),
        }
    }
}
