//! Background music.
//!
//! Playback is best-effort. A player that fails (for example because the
//! browser's autoplay policy rejects it) logs and carries on silently.

use crate::options::AudioOptions;

/// Something that can play the background track.
pub trait MusicPlayer {
    /// Start or resume playback.
    fn play(&mut self);
    /// Stop playback.
    fn stop(&mut self);
    /// Whether `play` has been called more recently than `stop`.
    fn is_playing(&self) -> bool;
}

/// A player with no audio output. Used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct SilentPlayer {
    track: String,
    playing: bool,
}

impl SilentPlayer {
    /// Player for the configured track.
    #[must_use]
    pub fn new(options: &AudioOptions) -> Self {
        Self {
            track: options.music.clone(),
            playing: false,
        }
    }
}

impl MusicPlayer for SilentPlayer {
    fn play(&mut self) {
        if !self.track.is_empty() {
            log::info!("music: {} (no audio output)", self.track);
        }
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(feature = "web")]
pub use self::web::HtmlAudioPlayer;

#[cfg(feature = "web")]
mod web {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    use super::MusicPlayer;
    use crate::error::GreetingError;
    use crate::options::AudioOptions;

    /// Plays the track through an `<audio>` element.
    #[derive(Debug)]
    pub struct HtmlAudioPlayer {
        element: Option<HtmlAudioElement>,
        playing: bool,
    }

    impl HtmlAudioPlayer {
        /// Create the audio element. An empty track disables music.
        ///
        /// # Errors
        ///
        /// Returns [`GreetingError::Web`] if the element cannot be created.
        pub fn new(options: &AudioOptions) -> Result<Self, GreetingError> {
            let element = if options.music.is_empty() {
                None
            } else {
                let element = HtmlAudioElement::new_with_src(&options.music)?;
                element.set_loop(options.looped);
                element.set_volume(f64::from(options.volume.clamp(0.0, 1.0)));
                Some(element)
            };
            Ok(Self {
                element,
                playing: false,
            })
        }
    }

    impl MusicPlayer for HtmlAudioPlayer {
        fn play(&mut self) {
            self.playing = true;
            let Some(element) = &self.element else {
                return;
            };
            match element.play() {
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::debug!("music playback rejected: {e:?}");
                    }
                }),
                Err(e) => log::debug!("music playback failed: {e:?}"),
            }
        }

        fn stop(&mut self) {
            self.playing = false;
            if let Some(element) = &self.element {
                let _ = element.pause();
            }
        }

        fn is_playing(&self) -> bool {
            self.playing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_player_tracks_state() {
        let mut player = SilentPlayer::new(&AudioOptions::default());
        assert!(!player.is_playing());
        player.play();
        assert!(player.is_playing());
        player.stop();
        assert!(!player.is_playing());
    }
}
