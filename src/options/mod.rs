//! Greeting options with TOML preset support.
//!
//! Intro timing, camera limits, room layout, fireworks, music and
//! keybindings are all consolidated here. Options serialize to/from TOML;
//! presets live in `assets/` next to the images they reference.

mod audio;
mod camera;
mod fireworks;
mod intro;
mod keybindings;
mod scene;

use std::path::Path;

pub use audio::AudioOptions;
pub use camera::CameraOptions;
pub use fireworks::FireworkOptions;
pub use intro::IntroOptions;
pub use keybindings::KeybindingOptions;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};

use crate::error::GreetingError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[intro]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Typed intro lines and timing.
    pub intro: IntroOptions,
    /// Camera projection and orbit limits.
    pub camera: CameraOptions,
    /// Room layout and card motion.
    pub scene: SceneOptions,
    /// Firework cadence and physics.
    pub fireworks: FireworkOptions,
    /// Background music.
    pub audio: AudioOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GreetingError::OptionsParse`] for malformed TOML or
    /// mistyped fields.
    pub fn from_toml_str(content: &str) -> Result<Self, GreetingError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| GreetingError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GreetingError::Io`] if the file cannot be read, or
    /// [`GreetingError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, GreetingError> {
        let content =
            std::fs::read_to_string(path).map_err(GreetingError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`GreetingError::Io`] if the file or its directory cannot
    /// be written.
    pub fn save(&self, path: &Path) -> Result<(), GreetingError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GreetingError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GreetingError::Io)?;
        }
        std::fs::write(path, content).map_err(GreetingError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn shipped_preset_matches_defaults() {
        let preset = include_str!("../../assets/greeting.toml");
        let opts = Options::from_toml_str(preset).unwrap();
        assert_eq!(opts.intro, IntroOptions::default());
        assert_eq!(opts.scene, SceneOptions::default());
        assert_eq!(opts.keybindings, KeybindingOptions::default());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[intro]
lines = ["> hi"]
tick_ms = 40
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.intro.lines, vec!["> hi".to_owned()]);
        assert_eq!(opts.intro.tick_ms, 40);
        // Everything else should be default
        assert_eq!(opts.intro.reveal_delay_ms, 1000);
        assert_eq!(opts.scene.cards.len(), 3);
        assert_eq!(opts.camera, CameraOptions::default());
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("Space"), Some(KeyAction::Start));
        assert_eq!(
            opts.keybindings.lookup("Escape"),
            Some(KeyAction::ClearSelection)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn parsed_keybindings_are_searchable() {
        let toml_str = r#"
[keybindings.bindings]
start = "Enter"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("Enter"), Some(KeyAction::Start));
        assert_eq!(opts.keybindings.lookup("Space"), None);
    }

    #[test]
    fn save_then_load_restores_options() {
        let dir = std::env::temp_dir()
            .join(format!("birthday-options-{}", std::process::id()));
        let path = dir.join("presets").join("custom.toml");
        let mut opts = Options::default();
        opts.intro.lines = vec!["> again".to_owned()];
        opts.fireworks.seed = Some(11);

        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(loaded, opts);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Options::load(Path::new("/nonexistent/birthday.toml"))
            .unwrap_err();
        assert!(matches!(err, GreetingError::Io(_)));
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[intro\n").unwrap_err();
        assert!(matches!(err, GreetingError::OptionsParse(_)));
    }

    #[test]
    fn lift_style_follows_scene_options() {
        let scene = SceneOptions::default();
        let style = scene.lift_style();
        assert_eq!(style.lift, 0.5);
        assert_eq!(style.scale, 1.6);
        assert_eq!(style.motion.as_millis(), 400);
    }
}
