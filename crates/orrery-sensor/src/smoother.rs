use crate::types::{OrientationSample, SmoothedOrientation};
use glam::Vec3;
use orrery_config::SmoothingConfig;

/// Largest frame delta accepted by `tick`; longer stalls are treated as this.
const MAX_FRAME_DT: f32 = 0.1;
/// Integration substep (seconds).
const SUBSTEP: f32 = 1.0 / 120.0;
/// Within this many degrees of the target and slower than `SETTLE_SPEED`, snap.
const SETTLE_DISTANCE: f32 = 1e-3;
const SETTLE_SPEED: f32 = 1e-2;

/// Spring filter over raw orientation samples.
///
/// Each axis is an independent unit-mass spring pulled toward the last
/// ingested sample: `a = -stiffness * (x - target) - damping * v`. With the
/// default tuning (50 / 20) the spring is overdamped, so a step input is
/// approached without overshoot.
pub struct OrientationSmoother {
    current: Vec3,
    velocity: Vec3,
    target: Vec3,
    stiffness: f32,
    damping: f32,
}

impl OrientationSmoother {
    pub fn new(config: &SmoothingConfig) -> Self {
        Self {
            current: Vec3::ZERO,
            velocity: Vec3::ZERO,
            target: Vec3::ZERO,
            stiffness: config.stiffness,
            damping: config.damping,
        }
    }

    /// Retarget the spring at a new sample.
    pub fn ingest(&mut self, sample: &OrientationSample) {
        self.target = sample.angles();
    }

    /// Place the spring at rest on `sample`. Used for the first reading of a
    /// session so the view starts where the device already is.
    pub fn seed(&mut self, sample: &OrientationSample) {
        self.target = sample.angles();
        self.current = self.target;
        self.velocity = Vec3::ZERO;
    }

    /// Advance the filter by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);
        let steps = (dt / SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;

        for _ in 0..steps {
            let acceleration =
                -self.stiffness * (self.current - self.target) - self.damping * self.velocity;
            self.velocity += acceleration * h;
            self.current += self.velocity * h;
        }

        if self.is_settled() {
            self.current = self.target;
            self.velocity = Vec3::ZERO;
        }
    }

    /// Current smoothed orientation.
    pub fn value(&self) -> SmoothedOrientation {
        SmoothedOrientation::from_angles(self.current)
    }

    /// Orientation the spring is heading toward.
    pub fn target(&self) -> SmoothedOrientation {
        SmoothedOrientation::from_angles(self.target)
    }

    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs().max_element() < SETTLE_DISTANCE
            && self.velocity.abs().max_element() < SETTLE_SPEED
    }

    /// Return to level with no motion.
    pub fn reset(&mut self) {
        self.current = Vec3::ZERO;
        self.velocity = Vec3::ZERO;
        self.target = Vec3::ZERO;
    }
}
