//! The greeting room: table, pictures, cards and fireworks.
//!
//! Layout is static after startup. Cards carry an animated lift driven by
//! the current selection; fireworks are simulated separately and only run
//! once the scene is revealed.

mod card;
mod fireworks;
mod layout;

pub use card::{default_cards, CardDescriptor, CardState, LiftStyle};
pub use fireworks::{Fireworks, ParticleInstance};
pub use layout::{default_frames, FrameLayout, QuadDraw, TableLayout};
use web_time::Duration;

use crate::camera::Ray;
use crate::options::SceneOptions;
use crate::picking;

/// Static room contents plus per-card lift state.
#[derive(Debug, Clone)]
pub struct Scene {
    background: String,
    table: TableLayout,
    frames: Vec<FrameLayout>,
    cards: Vec<CardState>,
    style: LiftStyle,
}

impl Scene {
    /// Build the room. Cards with an id already in use are dropped.
    #[must_use]
    pub fn new(options: &SceneOptions) -> Self {
        let mut cards: Vec<CardState> = Vec::with_capacity(options.cards.len());
        for descriptor in &options.cards {
            if cards.iter().any(|c| c.id() == descriptor.id) {
                log::warn!("duplicate card id {:?} ignored", descriptor.id);
                continue;
            }
            cards.push(CardState::new(descriptor.clone()));
        }
        Self {
            background: options.background.clone(),
            table: options.table.clone(),
            frames: options.frames.clone(),
            cards,
            style: options.lift_style(),
        }
    }

    /// Move every card's lift toward its target. Only the card whose id
    /// equals `active` rises.
    ///
    /// Returns `true` while any card is still moving.
    pub fn update_cards(&mut self, dt: Duration, active: Option<&str>) -> bool {
        let style = self.style;
        let mut moving = false;
        for card in &mut self.cards {
            let is_active = active == Some(card.id());
            moving |= card.step(dt, is_active, &style);
        }
        moving
    }

    /// Every quad in the room, cards last.
    #[must_use]
    pub fn quads(&self) -> Vec<QuadDraw<'_>> {
        let mut quads = self.table.quads();
        for frame in &self.frames {
            quads.extend(frame.quads());
        }
        for card in &self.cards {
            quads.push(QuadDraw {
                texture: Some(&card.descriptor().image),
                model: card.model(&self.style),
                tint: [1.0; 4],
            });
        }
        quads
    }

    /// Every image the room references, backdrop first, without repeats.
    #[must_use]
    pub fn texture_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = vec![self.background.as_str()];
        for quad in self.quads() {
            if let Some(path) = quad.texture {
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }
        paths
    }

    /// Id of the nearest card under `ray`, at its current pose.
    ///
    /// The table and picture frames block the ray; a hit on either picks
    /// nothing.
    #[must_use]
    pub fn pick_card(&self, ray: &Ray) -> Option<&str> {
        let mut targets: Vec<(Option<&str>, _)> = self
            .table
            .quads()
            .into_iter()
            .chain(self.frames.iter().flat_map(FrameLayout::quads))
            .map(|quad| (None, quad.model))
            .collect();
        targets.extend(
            self.cards
                .iter()
                .map(|card| (Some(card.id()), card.model(&self.style))),
        );
        picking::nearest_hit(ray, targets.iter().map(|(id, m)| (*id, m)))
            .and_then(|(id, _)| id)
    }

    /// Whether a card with `id` exists.
    #[must_use]
    pub fn has_card(&self, id: &str) -> bool {
        self.cards.iter().any(|c| c.id() == id)
    }

    /// Cards in declaration order.
    #[must_use]
    pub fn cards(&self) -> &[CardState] {
        &self.cards
    }

    /// Backdrop image path.
    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }

    /// Card lift parameters.
    #[must_use]
    pub fn lift_style(&self) -> &LiftStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;

    fn scene() -> Scene {
        Scene::new(&SceneOptions::default())
    }

    fn ray_above(point: Vec3) -> Ray {
        Ray {
            origin: point + Vec3::Y * 5.0,
            direction: Vec3::NEG_Y,
        }
    }

    #[test]
    fn duplicate_ids_are_dropped() {
        let mut options = SceneOptions::default();
        let dup = options.cards[0].clone();
        options.cards.push(dup);
        let scene = Scene::new(&options);
        assert_eq!(scene.cards().len(), 3);
    }

    #[test]
    fn picks_card_under_ray() {
        let scene = scene();
        let card = &scene.cards()[1];
        let hit = scene.pick_card(&ray_above(card.descriptor().position));
        assert_eq!(hit, Some("card-2"));
    }

    #[test]
    fn empty_space_picks_nothing() {
        let scene = scene();
        assert_eq!(scene.pick_card(&ray_above(Vec3::new(0.0, 0.0, -0.7))), None);
    }

    #[test]
    fn frame_in_front_of_card_blocks_the_pick() {
        let mut options = SceneOptions::default();
        let below = options.cards[0].position;
        options.frames.truncate(1);
        options.frames[0].position = below + Vec3::Y * 1.0;
        options.frames[0].rotation = Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0);
        let scene = Scene::new(&options);
        assert_eq!(scene.pick_card(&ray_above(below)), None);
    }

    #[test]
    fn table_underside_blocks_the_pick() {
        let scene = scene();
        let card = scene.cards()[1].descriptor().position;
        let ray = Ray {
            origin: card - Vec3::Y * 0.5,
            direction: Vec3::Y,
        };
        assert_eq!(scene.pick_card(&ray), None);
    }

    #[test]
    fn only_active_card_lifts() {
        let mut scene = scene();
        assert!(scene.update_cards(Duration::from_millis(100), Some("card-1")));
        let _ = scene.update_cards(Duration::from_secs(1), Some("card-1"));
        let lifts: Vec<f32> = scene.cards().iter().map(CardState::lift).collect();
        assert_eq!(lifts, vec![1.0, 0.0, 0.0]);
        assert!(!scene.update_cards(Duration::from_millis(16), Some("card-1")));
    }

    #[test]
    fn texture_paths_are_unique_and_start_with_backdrop() {
        let mut options = SceneOptions::default();
        options.frames[1].image = options.frames[0].image.clone();
        let scene = Scene::new(&options);
        let paths = scene.texture_paths();
        assert_eq!(paths[0], "assets/images/background.jpg");
        let mut sorted = paths.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), paths.len());
        // wood + 4 distinct photos + 3 cards + backdrop
        assert_eq!(paths.len(), 9);
    }

    #[test]
    fn lifted_card_is_still_pickable() {
        let mut scene = scene();
        let _ = scene.update_cards(Duration::from_secs(1), Some("card-3"));
        let style = *scene.lift_style();
        let card = &scene.cards()[2];
        let centre = card.model(&style).transform_point3(Vec3::ZERO);
        let ray = Ray {
            origin: centre + Vec3::Z * 5.0,
            direction: Vec3::NEG_Z,
        };
        assert_eq!(scene.pick_card(&ray), Some("card-3"));
        assert!(style.size.cmpgt(Vec2::ZERO).all());
    }
}
