//! Damped orbit control around a fixed look-at point.
//!
//! The eye lives on a sphere around the target. Drags and scrolls add to a
//! pending delta that bleeds into the actual angles a fraction per frame,
//! so motion eases out after the pointer stops.

use glam::{Vec2, Vec3};
use web_time::Duration;

use crate::camera::core::Camera;
use crate::options::CameraOptions;

/// Distance and polar-angle bounds for the orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    /// Closest allowed distance to the target.
    pub min_distance: f32,
    /// Farthest allowed distance to the target.
    pub max_distance: f32,
    /// Smallest polar angle (radians from +Y).
    pub min_polar: f32,
    /// Largest polar angle (radians from +Y).
    pub max_polar: f32,
}

impl OrbitLimits {
    /// Limits from the camera options, with swapped bounds reordered.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let (min_distance, max_distance) =
            ordered(options.min_distance.max(0.01), options.max_distance.max(0.01));
        let (min_polar, max_polar) = ordered(
            options.min_polar_deg.to_radians(),
            options.max_polar_deg.to_radians(),
        );
        Self {
            min_distance,
            max_distance,
            min_polar: min_polar.clamp(0.0, std::f32::consts::PI),
            max_polar: max_polar.clamp(0.0, std::f32::consts::PI),
        }
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    fn clamp_polar(&self, polar: f32) -> f32 {
        polar.clamp(self.min_polar, self.max_polar)
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Reference frame rate the damping factor is tuned for.
const DAMPING_FPS: f32 = 60.0;

/// Pending motion below this is dropped.
const SETTLE_EPSILON: f32 = 1e-5;

/// Spherical orbit camera with damping and limits.
#[derive(Debug, Clone)]
pub struct OrbitController {
    target: Vec3,
    /// Distance from the target.
    distance: f32,
    /// Angle from +Y in radians.
    polar: f32,
    /// Angle around +Y in radians, 0 along +Z.
    azimuth: f32,
    pending_polar: f32,
    pending_azimuth: f32,
    /// Pending distance change as a log scale factor.
    pending_zoom: f32,
    limits: OrbitLimits,
    damping: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    /// The projected camera, kept in sync with the spherical state.
    pub camera: Camera,
}

impl OrbitController {
    /// Place the eye at `eye` looking at the configured target.
    #[must_use]
    pub fn new(options: &CameraOptions, eye: Vec3, aspect: f32) -> Self {
        let limits = OrbitLimits::from_options(options);
        let offset = eye - options.target;
        let distance = offset.length().max(f32::EPSILON);
        let polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        let camera = Camera {
            eye,
            target: options.target,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut controller = Self {
            target: options.target,
            distance: limits.clamp_distance(distance),
            polar: limits.clamp_polar(polar),
            azimuth,
            pending_polar: 0.0,
            pending_azimuth: 0.0,
            pending_zoom: 0.0,
            limits,
            damping: options.damping.clamp(0.0, 1.0),
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            camera,
        };
        controller.update_camera_pos();
        controller
    }

    /// Queue an orbit from a pointer drag, in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.pending_azimuth -= delta.x * self.rotate_speed;
        self.pending_polar -= delta.y * self.rotate_speed;
    }

    /// Queue a zoom. Positive zooms in.
    pub fn zoom(&mut self, delta: f32) {
        self.pending_zoom -= delta * self.zoom_speed;
    }

    /// Apply a frame's share of the pending motion.
    ///
    /// Returns `true` while motion is still pending.
    pub fn update(&mut self, dt: Duration) -> bool {
        if !self.is_moving() {
            return false;
        }
        let factor = if self.damping >= 1.0 {
            1.0
        } else {
            1.0 - (1.0 - self.damping).powf(dt.as_secs_f32() * DAMPING_FPS)
        };

        let d_azimuth = self.pending_azimuth * factor;
        let d_polar = self.pending_polar * factor;
        let d_zoom = self.pending_zoom * factor;
        self.pending_azimuth -= d_azimuth;
        self.pending_polar -= d_polar;
        self.pending_zoom -= d_zoom;

        self.azimuth = (self.azimuth + d_azimuth) % std::f32::consts::TAU;
        self.polar = self.limits.clamp_polar(self.polar + d_polar);
        self.distance = self.limits.clamp_distance(self.distance * d_zoom.exp());

        for pending in [
            &mut self.pending_azimuth,
            &mut self.pending_polar,
            &mut self.pending_zoom,
        ] {
            if pending.abs() < SETTLE_EPSILON {
                *pending = 0.0;
            }
        }

        self.update_camera_pos();
        self.is_moving()
    }

    /// Whether any orbit motion is still pending.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.pending_azimuth != 0.0
            || self.pending_polar != 0.0
            || self.pending_zoom != 0.0
    }

    /// Update the aspect ratio after a surface resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Current distance from the target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Current polar angle in radians.
    #[must_use]
    pub fn polar(&self) -> f32 {
        self.polar
    }

    /// Current azimuth in radians.
    #[must_use]
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Active limits.
    #[must_use]
    pub fn limits(&self) -> OrbitLimits {
        self.limits
    }

    fn update_camera_pos(&mut self) {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        let offset = Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance;
        self.camera.eye = self.target + offset;
        self.camera.target = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(controller: &mut OrbitController) {
        for _ in 0..2000 {
            if !controller.update(Duration::from_millis(16)) {
                return;
            }
        }
        panic!("orbit never settled");
    }

    fn controller() -> OrbitController {
        let options = CameraOptions::default();
        let eye = options.target + Vec3::new(0.0, 2.1, 4.0);
        OrbitController::new(&options, eye, 1.5)
    }

    #[test]
    fn initial_pose_matches_eye() {
        let c = controller();
        let expected = CameraOptions::default().target + Vec3::new(0.0, 2.1, 4.0);
        assert!((c.camera.eye - expected).length() < 1e-4);
        assert!((c.distance() - expected.distance(c.camera.target)).abs() < 1e-4);
    }

    #[test]
    fn drag_is_damped_not_instant() {
        let mut c = controller();
        let start = c.azimuth();
        c.rotate(Vec2::new(-100.0, 0.0));
        assert!(c.update(Duration::from_millis(16)));
        let partial = c.azimuth() - start;
        assert!(partial > 0.0 && partial < 0.5);
        settle(&mut c);
        assert!((c.azimuth() - start - 0.5).abs() < 1e-3);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut c = controller();
        c.rotate(Vec2::new(0.0, 10_000.0));
        settle(&mut c);
        assert!((c.polar() - c.limits().min_polar).abs() < 1e-6);

        c.rotate(Vec2::new(0.0, -10_000.0));
        settle(&mut c);
        assert!((c.polar() - c.limits().max_polar).abs() < 1e-6);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut c = controller();
        c.zoom(1000.0);
        settle(&mut c);
        assert!((c.distance() - c.limits().min_distance).abs() < 1e-5);

        c.zoom(-1000.0);
        settle(&mut c);
        assert!((c.distance() - c.limits().max_distance).abs() < 1e-5);
    }

    #[test]
    fn eye_stays_on_sphere() {
        let mut c = controller();
        c.rotate(Vec2::new(37.0, -12.0));
        settle(&mut c);
        let d = c.camera.eye.distance(c.camera.target);
        assert!((d - c.distance()).abs() < 1e-4);
    }

    #[test]
    fn idle_controller_reports_no_motion() {
        let mut c = controller();
        assert!(!c.is_moving());
        assert!(!c.update(Duration::from_millis(16)));
    }
}
