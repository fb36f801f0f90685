//! Camera system for the greeting room.
//!
//! A perspective camera placed once on mount, then driven by a damped
//! orbit controller with distance and polar-angle limits.

/// Damped orbit controller.
pub mod controller;
/// Core camera struct, picking ray and GPU uniform types.
pub mod core;
/// Initial placement.
pub mod rig;

pub use self::controller::{OrbitController, OrbitLimits};
pub use self::core::{Camera, CameraUniform, Ray};
