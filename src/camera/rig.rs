//! One-time camera placement.

use glam::Vec3;

use crate::camera::controller::OrbitController;
use crate::options::CameraOptions;

/// Initial eye position: `radius` out from the target along the azimuth,
/// lifted by `height`.
#[must_use]
pub fn initial_eye(options: &CameraOptions) -> Vec3 {
    let (sin_a, cos_a) = options.azimuth_deg.to_radians().sin_cos();
    options.target
        + Vec3::new(options.radius * sin_a, options.height, options.radius * cos_a)
}

/// Place the camera and hand it to a damped orbit controller.
///
/// Called once on mount; the controller owns the camera afterwards.
#[must_use]
pub fn mount(options: &CameraOptions, aspect: f32) -> OrbitController {
    let eye = initial_eye(options);
    let controller = OrbitController::new(options, eye, aspect);
    log::debug!(
        "camera mounted at {} (distance {:.2})",
        controller.camera.eye,
        controller.distance()
    );
    controller
}
