use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Background music.
pub struct AudioOptions {
    /// Path or URL of the music track. Empty disables music.
    pub music: String,
    /// Playback volume (0-1).
    pub volume: f32,
    /// Whether the track loops.
    pub looped: bool,
}

impl Default for AudioOptions {
    fn default() -> Self {
        Self {
            music: "assets/audio/birthday.mp3".into(),
            volume: 0.6,
            looped: true,
        }
    }
}
