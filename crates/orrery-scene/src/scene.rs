use crate::{CelestialBody, ViewTransform};
use glam::{Mat4, Vec3};

/// Everything the renderer needs to pose the scene for one frame.
///
/// The renderer pulls one of these per frame; nothing here calls back into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot {
    /// Whether immersive mode is active.
    pub immersive: bool,
    /// Whole-scene rotation.
    pub view: ViewTransform,
    /// Body the user asked to look at, if any.
    pub focus: Option<CelestialBody>,
    /// Uniform scale applied to the whole scene.
    pub scene_scale: f32,
    /// Extra scale for the focused body.
    pub focus_scale: f32,
}

impl Default for RenderSnapshot {
    fn default() -> Self {
        Self {
            immersive: false,
            view: ViewTransform::IDENTITY,
            focus: None,
            scene_scale: 1.0,
            focus_scale: 1.0,
        }
    }
}

impl RenderSnapshot {
    /// Scene model matrix: scaled about the origin, then rotated.
    pub fn scene_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scene_scale),
            self.view.to_quat(),
            Vec3::ZERO,
        )
    }

    /// Scale the renderer should give `body` on top of the scene scale.
    pub fn body_scale(&self, body: CelestialBody) -> f32 {
        if self.focus == Some(body) {
            self.focus_scale
        } else {
            1.0
        }
    }
}
