use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Typed intro text and its timing.
pub struct IntroOptions {
    /// Lines revealed in order, one character per tick.
    pub lines: Vec<String>,
    /// Milliseconds between typing ticks.
    pub tick_ms: u64,
    /// Milliseconds between typing completion and the scene reveal.
    pub reveal_delay_ms: u64,
    /// Length of the overlay fade in milliseconds.
    pub fade_ms: u64,
    /// Half-period of the cursor blink in milliseconds.
    pub cursor_blink_ms: u64,
}

impl Default for IntroOptions {
    fn default() -> Self {
        Self {
            lines: vec![
                "> hey".into(),
                "> ved".into(),
                "> happy birthday!".into(),
                "> i built you a little room. drag to look around".into(),
            ],
            tick_ms: 100,
            reveal_delay_ms: 1000,
            fade_ms: 700,
            cursor_blink_ms: 500,
        }
    }
}

impl IntroOptions {
    /// Typing tick interval.
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Delay before the scene reveal.
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Overlay fade duration.
    #[must_use]
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    /// Cursor blink half-period.
    #[must_use]
    pub fn cursor_blink(&self) -> Duration {
        Duration::from_millis(self.cursor_blink_ms)
    }
}
