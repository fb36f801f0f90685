//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a pointer
//! gesture or a programmatic call, is represented as a `GreetingCommand`.
//! Consumers construct commands and pass them to
//! [`GreetingEngine::execute`](super::GreetingEngine::execute).

use glam::Vec2;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(GreetingCommand::Start, now);
/// engine.execute(GreetingCommand::Zoom { delta: 1.0 }, now);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GreetingCommand {
    // ── Intro ───────────────────────────────────────────────────────
    /// Begin the typed intro and the music. Only the first one counts.
    Start,

    // ── Cards ───────────────────────────────────────────────────────
    /// Lift the card, or put it back if it is already lifted.
    ToggleCard {
        /// Card id.
        id: String,
    },

    /// Put any lifted card back down.
    ClearSelection,

    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the camera by `delta` pixels of pointer movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
}
