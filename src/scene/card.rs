//! Clickable birthday cards.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::util::easing::EasingFunction;

/// Static description of one card. Never mutated after startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardDescriptor {
    /// Unique id used by selection.
    pub id: String,
    /// Path of the card face image.
    pub image: String,
    /// Resting position of the card centre.
    pub position: Vec3,
    /// Resting rotation as XYZ Euler angles in radians.
    pub rotation: Vec3,
}

impl CardDescriptor {
    fn resting_rotation(&self) -> Quat {
        euler_xyz(self.rotation)
    }

    /// Upright pose facing +Z, keeping the resting yaw.
    fn lifted_rotation(&self) -> Quat {
        euler_xyz(Vec3::new(LIFTED_TILT, self.rotation.y, 0.0))
    }
}

/// Backward tilt of a lifted card, so it leans slightly toward the sky.
const LIFTED_TILT: f32 = -0.25;

fn euler_xyz(r: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
}

/// How lifted cards differ from resting ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftStyle {
    /// World size of a card quad (width, height).
    pub size: Vec2,
    /// Height a fully lifted card rises.
    pub lift: f32,
    /// Scale of a fully lifted card.
    pub scale: f32,
    /// Time to go from resting to lifted.
    pub motion: Duration,
}

/// A card plus its animated lift.
#[derive(Debug, Clone)]
pub struct CardState {
    descriptor: CardDescriptor,
    /// Linear lift progress in `[0, 1]`.
    lift: f32,
}

impl CardState {
    /// Resting card for `descriptor`.
    #[must_use]
    pub fn new(descriptor: CardDescriptor) -> Self {
        Self {
            descriptor,
            lift: 0.0,
        }
    }

    /// The static descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &CardDescriptor {
        &self.descriptor
    }

    /// Card id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    /// Linear lift progress.
    #[must_use]
    pub fn lift(&self) -> f32 {
        self.lift
    }

    /// Move the lift toward 1 when `active`, toward 0 otherwise.
    /// Returns `true` while the card is still in motion.
    pub fn step(&mut self, dt: Duration, active: bool, style: &LiftStyle) -> bool {
        let target = if active { 1.0 } else { 0.0 };
        let rate = if style.motion.is_zero() {
            f32::INFINITY
        } else {
            dt.as_secs_f32() / style.motion.as_secs_f32()
        };
        if self.lift < target {
            self.lift = (self.lift + rate).min(target);
        } else if self.lift > target {
            self.lift = (self.lift - rate).max(target);
        }
        self.lift != target
    }

    /// World transform of the unit quad at the current lift.
    #[must_use]
    pub fn model(&self, style: &LiftStyle) -> Mat4 {
        let t = EasingFunction::CubicOut.evaluate(self.lift);
        let position = self.descriptor.position + Vec3::Y * (style.lift * t);
        let rotation = self
            .descriptor
            .resting_rotation()
            .slerp(self.descriptor.lifted_rotation(), t);
        let scale = 1.0 + (style.scale - 1.0) * t;
        Mat4::from_scale_rotation_translation(
            (style.size * scale).extend(1.0),
            rotation,
            position,
        )
    }
}

/// Three cards lying face-up on the default table.
#[must_use]
pub fn default_cards() -> Vec<CardDescriptor> {
    let flat = Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0);
    [(-0.9, 0.12), (0.0, -0.05), (0.9, 0.1)]
        .into_iter()
        .enumerate()
        .map(|(i, (x, yaw))| CardDescriptor {
            id: format!("card-{}", i + 1),
            image: format!("assets/images/card{}.jpg", i + 1),
            position: Vec3::new(x, 0.01, 0.35),
            rotation: flat + Vec3::new(0.0, 0.0, yaw),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> LiftStyle {
        LiftStyle {
            size: Vec2::new(0.5, 0.7),
            lift: 0.5,
            scale: 1.5,
            motion: Duration::from_millis(400),
        }
    }

    fn card() -> CardState {
        CardState::new(default_cards().remove(0))
    }

    #[test]
    fn default_ids_are_unique() {
        let cards = default_cards();
        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["card-1", "card-2", "card-3"]);
    }

    #[test]
    fn lift_reaches_target_and_stops() {
        let mut card = card();
        let style = style();
        assert!(card.step(Duration::from_millis(200), true, &style));
        assert!((card.lift() - 0.5).abs() < 1e-5);
        assert!(!card.step(Duration::from_millis(300), true, &style));
        assert_eq!(card.lift(), 1.0);

        assert!(card.step(Duration::from_millis(100), false, &style));
        assert!(!card.step(Duration::from_secs(1), false, &style));
        assert_eq!(card.lift(), 0.0);
    }

    #[test]
    fn zero_motion_snaps() {
        let mut card = card();
        let style = LiftStyle {
            motion: Duration::ZERO,
            ..style()
        };
        assert!(!card.step(Duration::ZERO, true, &style));
        assert_eq!(card.lift(), 1.0);
    }

    #[test]
    fn resting_card_lies_flat() {
        let card = card();
        let model = card.model(&style());
        // Quad normal (+Z) should point up when the card is flat.
        let normal = model.transform_vector3(Vec3::Z).normalize();
        assert!(normal.y > 0.99, "normal = {normal}");
        let centre = model.transform_point3(Vec3::ZERO);
        assert!((centre - card.descriptor().position).length() < 1e-5);
    }

    #[test]
    fn lifted_card_rises_and_grows() {
        let mut card = card();
        let style = style();
        let _ = card.step(Duration::from_secs(1), true, &style);
        let model = card.model(&style);

        let centre = model.transform_point3(Vec3::ZERO);
        assert!((centre.y - (card.descriptor().position.y + 0.5)).abs() < 1e-5);

        let width = model.transform_vector3(Vec3::X).length();
        assert!((width - 0.5 * 1.5).abs() < 1e-4);

        let normal = model.transform_vector3(Vec3::Z).normalize();
        assert!(normal.z > 0.9, "lifted card should face forward: {normal}");
    }
}
