//! Read accessors for [`GreetingEngine`].

use glam::Vec2;

use super::GreetingEngine;
use crate::camera::Camera;
use crate::intro::{IntroFrame, IntroPhase};
use crate::options::Options;
use crate::scene::{Fireworks, Scene};

impl GreetingEngine {
    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current intro phase.
    #[must_use]
    pub fn phase(&self) -> IntroPhase {
        self.intro.phase()
    }

    /// The overlay as of the last frame.
    #[must_use]
    pub fn overlay(&self) -> &IntroFrame {
        &self.overlay
    }

    /// The room.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Live firework particles.
    #[must_use]
    pub fn fireworks(&self) -> &Fireworks {
        &self.fireworks
    }

    /// The camera as placed by the orbit controller.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera.camera
    }

    /// Id of the lifted card.
    #[must_use]
    pub fn active_card(&self) -> Option<&str> {
        self.selection.active()
    }

    /// Card under the cursor, if the cursor is over the surface.
    #[must_use]
    pub fn hovered_card(&self) -> Option<&str> {
        let cursor = self.input.cursor()?;
        let viewport = Vec2::new(self.viewport.0 as f32, self.viewport.1 as f32);
        let ray = self.camera.camera.screen_ray(cursor, viewport);
        self.scene.pick_card(&ray)
    }

    /// Surface size in physical pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Whether background music has been started and not stopped.
    #[must_use]
    pub fn is_music_playing(&self) -> bool {
        self.music.is_playing()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }
}
