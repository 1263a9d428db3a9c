//! Pose type definition

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid transform (position and orientation) in a tracking reference space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    matrix: Mat4,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        matrix: Mat4::IDENTITY,
    };

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Build from a column-major 16-element array, the layout XR runtimes hand out
    pub fn from_cols_array(cols: &[f32; 16]) -> Self {
        Self {
            matrix: Mat4::from_cols_array(cols),
        }
    }

    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self {
            matrix: Mat4::from_rotation_translation(rotation, translation),
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            matrix: Mat4::from_translation(position),
        }
    }

    pub fn to_mat4(&self) -> Mat4 {
        self.matrix
    }

    /// Get position as Vec3
    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// Orientation as a quaternion
    pub fn orientation(&self) -> Quat {
        let (_, rotation, _) = self.matrix.to_scale_rotation_translation();
        rotation
    }
}

impl From<Mat4> for Pose {
    fn from(matrix: Mat4) -> Self {
        Self::from_matrix(matrix)
    }
}
