//! Static room furniture: the table and the picture frames.
//!
//! Everything is built from unit quads (XY plane, facing +Z) so a single
//! textured-quad pipeline can draw the whole room.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// One textured or flat-colored quad to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadDraw<'a> {
    /// Image path; `None` draws the tint alone.
    pub texture: Option<&'a str>,
    /// World transform of the unit quad.
    pub model: Mat4,
    /// Multiplied with the texture color.
    pub tint: [f32; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Table slab and legs.
pub struct TableLayout {
    /// Centre of the table top surface.
    pub center: Vec3,
    /// Top surface size (width along X, depth along Z).
    pub size: Vec2,
    /// Slab thickness.
    pub thickness: f32,
    /// Leg length below the slab.
    pub leg_height: f32,
    /// Leg cross-section width.
    pub leg_width: f32,
    /// Top surface image.
    pub texture: String,
    /// Top surface tint.
    pub tint: [f32; 4],
    /// Edge and leg color.
    pub edge_color: [f32; 4],
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            size: Vec2::new(3.2, 1.8),
            thickness: 0.08,
            leg_height: 0.9,
            leg_width: 0.08,
            texture: "assets/images/wood.jpg".into(),
            tint: [1.0, 1.0, 1.0, 1.0],
            edge_color: [0.32, 0.2, 0.12, 1.0],
        }
    }
}

impl TableLayout {
    /// Quads of the slab (textured top) and four legs.
    #[must_use]
    pub fn quads(&self) -> Vec<QuadDraw<'_>> {
        let mut quads: Vec<QuadDraw<'_>> = Vec::with_capacity(30);

        let slab_center = self.center - Vec3::Y * (self.thickness * 0.5);
        let slab_size = Vec3::new(self.size.x, self.thickness, self.size.y);
        let slab = box_quads(slab_center, slab_size, self.edge_color);
        quads.extend(slab);
        // The +Y face comes first; give it the wood texture.
        quads[0].texture = Some(&self.texture);
        quads[0].tint = self.tint;

        let inset = self.leg_width;
        let half = Vec2::new(self.size.x * 0.5 - inset, self.size.y * 0.5 - inset);
        let leg_y = self.center.y - self.thickness - self.leg_height * 0.5;
        let leg_size = Vec3::new(self.leg_width, self.leg_height, self.leg_width);
        for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
            let leg_center = Vec3::new(
                self.center.x + sx * half.x,
                leg_y,
                self.center.z + sz * half.y,
            );
            quads.extend(box_quads(leg_center, leg_size, self.edge_color));
        }
        quads
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A picture hung in the room.
pub struct FrameLayout {
    /// Picture image path.
    pub image: String,
    /// Centre of the picture.
    pub position: Vec3,
    /// XYZ Euler rotation in radians.
    pub rotation: Vec3,
    /// Picture size (width, height).
    pub size: Vec2,
    /// Border width around the picture.
    #[serde(default = "default_border")]
    pub border: f32,
}

fn default_border() -> f32 {
    0.06
}

/// Color of the frame border behind each picture.
const FRAME_COLOR: [f32; 4] = [0.12, 0.09, 0.07, 1.0];

/// Offset of the picture in front of its border, along the frame normal.
const PICTURE_OFFSET: f32 = 0.004;

impl FrameLayout {
    /// Border quad followed by the picture quad.
    #[must_use]
    pub fn quads(&self) -> [QuadDraw<'_>; 2] {
        let r = self.rotation;
        let rotation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        let normal = rotation * Vec3::Z;
        let border_size = self.size + Vec2::splat(self.border * 2.0);
        [
            QuadDraw {
                texture: None,
                model: Mat4::from_scale_rotation_translation(
                    border_size.extend(1.0),
                    rotation,
                    self.position,
                ),
                tint: FRAME_COLOR,
            },
            QuadDraw {
                texture: Some(&self.image),
                model: Mat4::from_scale_rotation_translation(
                    self.size.extend(1.0),
                    rotation,
                    self.position + normal * PICTURE_OFFSET,
                ),
                tint: [1.0; 4],
            },
        ]
    }
}

/// Three pictures on the back wall and one on each side.
#[must_use]
pub fn default_frames() -> Vec<FrameLayout> {
    let half_pi = std::f32::consts::FRAC_PI_2;
    let back = [(-1.6, 1.7), (0.0, 1.9), (1.6, 1.7)]
        .map(|(x, y)| (Vec3::new(x, y, -2.4), Vec3::ZERO));
    let sides = [
        (Vec3::new(-3.0, 1.6, -0.6), Vec3::new(0.0, half_pi, 0.0)),
        (Vec3::new(3.0, 1.6, -0.6), Vec3::new(0.0, -half_pi, 0.0)),
    ];
    back.into_iter()
        .chain(sides)
        .enumerate()
        .map(|(i, (position, rotation))| FrameLayout {
            image: format!("assets/images/photo{}.jpg", i + 1),
            position,
            rotation,
            size: Vec2::new(0.9, 0.65),
            border: default_border(),
        })
        .collect()
}

/// Six quads forming an axis-aligned box. The +Y face is first.
fn box_quads(center: Vec3, size: Vec3, tint: [f32; 4]) -> [QuadDraw<'static>; 6] {
    let half = size * 0.5;
    let half_pi = std::f32::consts::FRAC_PI_2;
    // (face normal offset, rotation taking +Z to that normal, face extent)
    let faces = [
        (Vec3::Y * half.y, Quat::from_rotation_x(-half_pi), Vec2::new(size.x, size.z)),
        (-Vec3::Y * half.y, Quat::from_rotation_x(half_pi), Vec2::new(size.x, size.z)),
        (Vec3::Z * half.z, Quat::IDENTITY, Vec2::new(size.x, size.y)),
        (-Vec3::Z * half.z, Quat::from_rotation_y(std::f32::consts::PI), Vec2::new(size.x, size.y)),
        (Vec3::X * half.x, Quat::from_rotation_y(half_pi), Vec2::new(size.z, size.y)),
        (-Vec3::X * half.x, Quat::from_rotation_y(-half_pi), Vec2::new(size.z, size.y)),
    ];
    faces.map(|(offset, rotation, extent)| QuadDraw {
        texture: None,
        model: Mat4::from_scale_rotation_translation(
            extent.extend(1.0),
            rotation,
            center + offset,
        ),
        tint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_faces_point_outward() {
        let quads = box_quads(Vec3::ZERO, Vec3::new(2.0, 1.0, 4.0), [1.0; 4]);
        for quad in quads {
            let centre = quad.model.transform_point3(Vec3::ZERO);
            let normal = quad.model.transform_vector3(Vec3::Z).normalize();
            assert!(
                centre.normalize().dot(normal) > 0.99,
                "face at {centre} has normal {normal}"
            );
        }
    }

    #[test]
    fn table_top_is_textured_and_flush() {
        let table = TableLayout::default();
        let quads = table.quads();
        assert_eq!(quads.len(), 30);
        assert_eq!(quads[0].texture, Some("assets/images/wood.jpg"));
        let top = quads[0].model.transform_point3(Vec3::ZERO);
        assert!((top.y - table.center.y).abs() < 1e-5);
        assert!(quads[1..].iter().all(|q| q.texture.is_none()));
    }

    #[test]
    fn picture_sits_in_front_of_border() {
        let frames = default_frames();
        let frame = &frames[0];
        let [border, picture] = frame.quads();
        let b = border.model.transform_point3(Vec3::ZERO);
        let p = picture.model.transform_point3(Vec3::ZERO);
        assert!(p.z > b.z);
        assert_eq!(picture.texture, Some(frame.image.as_str()));
    }

    #[test]
    fn side_frames_face_the_room() {
        for frame in default_frames() {
            let [_, picture] = frame.quads();
            let centre = picture.model.transform_point3(Vec3::ZERO);
            let normal = picture.model.transform_vector3(Vec3::Z).normalize();
            // Facing inward: normal points back toward the room's vertical axis.
            let inward = Vec3::new(-centre.x, 0.0, -centre.z).normalize();
            assert!(normal.dot(inward) > 0.5, "{} faces {normal}", frame.image);
        }
    }
}
