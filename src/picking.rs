//! Ray picking against quads.
//!
//! Cards are unit quads (XY plane, facing +Z) under a model transform.
//! The ray is taken into the quad's local space, where the hit test is a
//! plane intersection followed by a bounds check.

use glam::Mat4;

use crate::camera::Ray;

/// Half-extent of the unit quad.
const HALF: f32 = 0.5;

/// Distance along `ray` to the quad under `model`, if hit.
///
/// Quads are two-sided. Degenerate (non-invertible) transforms never hit.
#[must_use]
pub fn ray_quad_hit(ray: &Ray, model: &Mat4) -> Option<f32> {
    if model.determinant().abs() <= f32::EPSILON {
        return None;
    }
    let inv = model.inverse();
    let origin = inv.transform_point3(ray.origin);
    let direction = inv.transform_vector3(ray.direction);
    if direction.z.abs() <= f32::EPSILON {
        return None;
    }
    // Parameter is shared between spaces since the transform is affine.
    let t = -origin.z / direction.z;
    if t < 0.0 {
        return None;
    }
    let local = origin + direction * t;
    (local.x.abs() <= HALF && local.y.abs() <= HALF).then_some(t)
}

/// The nearest hit among `(key, model)` pairs.
pub fn nearest_hit<'a, K, I>(ray: &Ray, quads: I) -> Option<(K, f32)>
where
    I: IntoIterator<Item = (K, &'a Mat4)>,
{
    quads
        .into_iter()
        .filter_map(|(key, model)| ray_quad_hit(ray, model).map(|t| (key, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
