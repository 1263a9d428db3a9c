//! Decomposed object transform

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, rotation and scale of a scene entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl ObjectTransform {
    pub fn with_uniform_scale(scale: f32) -> Self {
        Self {
            scale: Vec3::splat(scale),
            ..Default::default()
        }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Rotate about the local Y axis, post-multiplying the current rotation
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation *= Quat::from_rotation_y(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_y_is_local() {
        let mut transform = ObjectTransform {
            rotation: Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
            ..Default::default()
        };
        transform.rotate_y(0.5);

        let expected = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2) * Quat::from_rotation_y(0.5);
        assert!(transform.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_to_mat4_applies_scale() {
        let mut transform = ObjectTransform::with_uniform_scale(2.0);
        transform.position = Vec3::new(1.0, 0.0, 0.0);

        let point = transform.to_mat4().transform_point3(Vec3::Y);
        assert_eq!(point, Vec3::new(1.0, 2.0, 0.0));
    }
}
