use glam::Vec3;
use orrery_config::ViewConfig;
use orrery_scene::ViewTransform;

/// Raw device-orientation reading, in degrees.
///
/// `alpha` is the compass heading in `[0, 360)`, `beta` the front-back tilt in
/// `[-180, 180]`, `gamma` the left-right tilt in `[-90, 90]`. Devices may leave
/// any of them out; a missing angle reads as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationSample {
    pub alpha: Option<f32>,
    pub beta: Option<f32>,
    pub gamma: Option<f32>,
}

impl OrientationSample {
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// `(alpha, beta, gamma)` with missing angles as zero.
    pub fn angles(&self) -> Vec3 {
        Vec3::new(
            self.alpha.unwrap_or(0.0),
            self.beta.unwrap_or(0.0),
            self.gamma.unwrap_or(0.0),
        )
    }
}

/// Damped orientation, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothedOrientation {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl SmoothedOrientation {
    pub const LEVEL: Self = Self {
        alpha: 0.0,
        beta: 0.0,
        gamma: 0.0,
    };

    pub fn from_angles(angles: Vec3) -> Self {
        Self {
            alpha: angles.x,
            beta: angles.y,
            gamma: angles.z,
        }
    }

    pub fn view_transform(&self, view: &ViewConfig) -> ViewTransform {
        ViewTransform::from_angles(self.alpha, self.beta, self.gamma, view)
    }
}
