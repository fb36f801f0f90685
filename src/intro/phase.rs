/// Where the intro is in its lifecycle.
///
/// ```text
/// Idle --Start--> Typing --TypingFinished--> Revealing --RevealElapsed--> Active
/// ```
///
/// `Active` is terminal for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntroPhase {
    /// Waiting for the start key; the cursor blinks on an empty overlay.
    #[default]
    Idle,
    /// Lines are being revealed character by character.
    Typing,
    /// Typing is done; the reveal delay is running.
    Revealing,
    /// The scene is active and the overlay fades out.
    Active,
}

/// Inputs to [`IntroPhase::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntroEvent {
    /// The user pressed the start key.
    Start,
    /// The typing cursor reached its terminal position.
    TypingFinished,
    /// The reveal delay fired.
    RevealElapsed,
}

impl IntroPhase {
    /// The phase reached by applying `event`, or `None` if the event is not
    /// legal in this phase.
    #[must_use]
    pub fn next(self, event: IntroEvent) -> Option<Self> {
        match (self, event) {
            (Self::Idle, IntroEvent::Start) => Some(Self::Typing),
            (Self::Typing, IntroEvent::TypingFinished) => Some(Self::Revealing),
            (Self::Revealing, IntroEvent::RevealElapsed) => Some(Self::Active),
            _ => None,
        }
    }

    /// Whether the user has started the sequence.
    #[must_use]
    pub fn is_started(self) -> bool {
        self != Self::Idle
    }

    /// Whether the 3D scene is active.
    #[must_use]
    pub fn is_scene_active(self) -> bool {
        self == Self::Active
    }
}
