use glam::Vec2;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::scene::{
    default_cards, default_frames, CardDescriptor, FrameLayout, LiftStyle,
    TableLayout,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Room contents: backdrop, table, pictures and cards.
pub struct SceneOptions {
    /// Environment image drawn behind everything.
    pub background: String,
    /// Table placement and texture.
    pub table: TableLayout,
    /// Pictures hung around the room.
    pub frames: Vec<FrameLayout>,
    /// Clickable cards. Ids must be unique.
    pub cards: Vec<CardDescriptor>,
    /// Card quad size (width, height).
    pub card_size: Vec2,
    /// How far an active card rises.
    pub card_lift: f32,
    /// Scale of an active card.
    pub card_scale: f32,
    /// Milliseconds for a card to lift or settle.
    pub card_motion_ms: u64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            background: "assets/images/background.jpg".into(),
            table: TableLayout::default(),
            frames: default_frames(),
            cards: default_cards(),
            card_size: Vec2::new(0.5, 0.7),
            card_lift: 0.5,
            card_scale: 1.6,
            card_motion_ms: 400,
        }
    }
}

impl SceneOptions {
    /// Card lift parameters.
    #[must_use]
    pub fn lift_style(&self) -> LiftStyle {
        LiftStyle {
            size: self.card_size,
            lift: self.card_lift,
            scale: self.card_scale,
            motion: Duration::from_millis(self.card_motion_ms),
        }
    }
}
