//! Model matrix of an item

use glam::{Mat4, Vec3, Vec4};
use glpaint_core::Axis;
use serde::{Deserialize, Serialize};

/// Keep the item facing the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Billboard {
    /// Local Z faces the camera, local Y follows the camera's up direction
    Free,
    /// Local Z faces the camera while rotating only about this axis
    Axis(Axis),
}

/// Placement of an item's local coordinate system in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub origin: Vec3,
    /// World units per local unit
    pub scale: f32,
    /// Rotation in degrees about `rotation_axis`; unused in billboard mode
    pub rotation_angle: f32,
    pub rotation_axis: Vec3,
    pub billboard: Option<Billboard>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            scale: 1.0,
            rotation_angle: 0.0,
            rotation_axis: Vec3::Y,
            billboard: None,
        }
    }
}

impl Transform {
    pub fn at(origin: Vec3) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, degrees: f32, axis: Vec3) -> Self {
        self.rotation_angle = degrees;
        self.rotation_axis = axis;
        self
    }

    pub fn with_billboard(mut self, billboard: Billboard) -> Self {
        self.billboard = Some(billboard);
        self
    }

    /// Model matrix: translate, then rotate (or billboard), then scale.
    ///
    /// Billboard mode needs the inverted view matrix; without it the
    /// regular rotation is used.
    pub fn model_matrix(&self, view_inverse: Option<&Mat4>) -> Mat4 {
        let translation = Mat4::from_translation(self.origin);
        let scale = Mat4::from_scale(Vec3::splat(self.scale));

        let orientation = match (self.billboard, view_inverse) {
            (Some(billboard), Some(view_inverse)) => self.billboard_basis(billboard, view_inverse),
            _ => {
                let axis = self.rotation_axis.normalize_or_zero();
                if axis == Vec3::ZERO {
                    Mat4::IDENTITY
                } else {
                    Mat4::from_axis_angle(axis, self.rotation_angle.to_radians())
                }
            }
        };

        translation * orientation * scale
    }

    fn billboard_basis(&self, billboard: Billboard, view_inverse: &Mat4) -> Mat4 {
        let cam_up = (*view_inverse * Vec4::new(0.0, 1.0, 0.0, 0.0))
            .truncate()
            .normalize_or_zero();
        let cam_pos = (*view_inverse * Vec4::W).truncate();
        let look = (cam_pos - self.origin).normalize_or_zero();

        let (right, up, look) = match billboard {
            Billboard::Free => {
                let right = cam_up.cross(look);
                (right, look.cross(right), look)
            }
            Billboard::Axis(axis) => {
                let mut up = Vec3::ZERO;
                up[axis.index()] = 1.0;
                let mut flat = look;
                flat[axis.index()] = 0.0;
                let look = flat.normalize_or_zero();
                (up.cross(look), up, look)
            }
        };

        Mat4::from_cols(right.extend(0.0), up.extend(0.0), look.extend(0.0), Vec4::W)
    }
}
