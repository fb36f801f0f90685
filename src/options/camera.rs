use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection, initial placement and orbit constraints.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Look-at point the camera orbits.
    pub target: Vec3,
    /// Horizontal distance of the initial eye from the target.
    pub radius: f32,
    /// Height of the initial eye above the target.
    pub height: f32,
    /// Initial azimuth around the vertical axis, in degrees (0 = +Z).
    pub azimuth_deg: f32,
    /// Closest allowed orbit distance.
    pub min_distance: f32,
    /// Farthest allowed orbit distance.
    pub max_distance: f32,
    /// Smallest polar angle (from straight up), in degrees.
    pub min_polar_deg: f32,
    /// Largest polar angle (from straight up), in degrees.
    pub max_polar_deg: f32,
    /// Fraction of the pending orbit motion applied per frame (0-1).
    pub damping: f32,
    /// Radians of orbit per pixel of drag.
    pub rotate_speed: f32,
    /// Distance scale per scroll unit.
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            znear: 0.1,
            zfar: 100.0,
            target: Vec3::new(0.0, 0.4, 0.0),
            radius: 4.0,
            height: 2.1,
            azimuth_deg: 0.0,
            min_distance: 2.5,
            max_distance: 8.0,
            min_polar_deg: 20.0,
            max_polar_deg: 80.0,
            damping: 0.08,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }
}
