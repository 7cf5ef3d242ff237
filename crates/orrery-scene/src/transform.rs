use glam::{Mat4, Quat};
use orrery_config::ViewConfig;
use serde::{Deserialize, Serialize};

/// Scene rotation derived from head orientation, in degrees.
///
/// Applied to the whole scene in X, Y, Z order. The identity leaves the
/// scene untouched, which is what the renderer sees outside immersive mode.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewTransform {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub rotate_z: f32,
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
        rotate_z: 0.0,
    };

    /// Map smoothed device angles (degrees) onto a scene rotation.
    ///
    /// `rotate_x = -(beta - neutral_beta) * pitch_gain`,
    /// `rotate_y = -gamma * pitch_gain`,
    /// `rotate_z = alpha * yaw_gain`.
    pub fn from_angles(alpha: f32, beta: f32, gamma: f32, view: &ViewConfig) -> Self {
        Self {
            rotate_x: -(beta - view.neutral_beta) * view.pitch_gain,
            rotate_y: -gamma * view.pitch_gain,
            rotate_z: alpha * view.yaw_gain,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Rotation as a quaternion (X, then Y, then Z).
    pub fn to_quat(&self) -> Quat {
        Quat::from_rotation_x(self.rotate_x.to_radians())
            * Quat::from_rotation_y(self.rotate_y.to_radians())
            * Quat::from_rotation_z(self.rotate_z.to_radians())
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.to_quat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_pose_is_identity() {
        let view = ViewTransform::from_angles(0.0, 90.0, 0.0, &ViewConfig::default());
        assert!(view.is_identity());
        assert!(view.to_quat().abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn gains_apply_per_axis() {
        let view = ViewTransform::from_angles(100.0, 60.0, -10.0, &ViewConfig::default());
        assert!((view.rotate_x - 24.0).abs() < 1e-4);
        assert!((view.rotate_y - 8.0).abs() < 1e-4);
        assert!((view.rotate_z - 20.0).abs() < 1e-4);
    }

    #[test]
    fn flat_device_tilts_scene() {
        // Lying flat (beta = 0) reads as a 90 degree pitch away from upright.
        let view = ViewTransform::from_angles(0.0, 0.0, 0.0, &ViewConfig::default());
        assert!((view.rotate_x - 72.0).abs() < 1e-4);
        assert_eq!(view.rotate_y, 0.0);
    }

    #[test]
    fn rotation_matrix_turns_scene_about_x() {
        let view = ViewTransform {
            rotate_x: 90.0,
            ..ViewTransform::IDENTITY
        };
        let turned = view.rotation_matrix().transform_vector3(glam::Vec3::Y);
        assert!(turned.abs_diff_eq(glam::Vec3::Z, 1e-6));
    }

    #[test]
    fn single_axis_quat_matches_glam() {
        let view = ViewTransform {
            rotate_x: 30.0,
            ..ViewTransform::IDENTITY
        };
        let expected = Quat::from_rotation_x(30.0_f32.to_radians());
        assert!(view.to_quat().abs_diff_eq(expected, 1e-6));
    }
}
