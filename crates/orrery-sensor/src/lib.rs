pub mod permission;
pub mod smoother;
pub mod types;

pub use permission::{ConsentError, ConsentPrompt, PermissionGate, PermissionState};
pub use smoother::OrientationSmoother;
pub use types::{OrientationSample, SmoothedOrientation};

use orrery_input::{Publisher, Subscription};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("No orientation sensor on this device")]
    Unavailable,
    #[error("Orientation source failed: {0}")]
    Source(String),
}

/// A device-orientation event stream.
///
/// Each call installs a fresh subscription; dropping it unsubscribes.
pub trait OrientationSource {
    fn subscribe(&mut self) -> Result<Subscription<OrientationSample>, SensorError>;
}

/// Source for devices without an orientation sensor.
pub struct NoOrientationSensor;

impl OrientationSource for NoOrientationSensor {
    fn subscribe(&mut self) -> Result<Subscription<OrientationSample>, SensorError> {
        Err(SensorError::Unavailable)
    }
}

/// Synthetic head sway for development without a motion sensor.
///
/// Each subscription gets its own producer task on the given runtime; the
/// task ends as soon as the subscription is dropped.
pub struct SimulatedOrientation {
    runtime: Handle,
    period: Duration,
}

impl SimulatedOrientation {
    pub fn new(runtime: Handle) -> Self {
        Self::with_rate(runtime, 60.0)
    }

    pub fn with_rate(runtime: Handle, rate_hz: f32) -> Self {
        Self {
            runtime,
            period: Duration::from_secs_f32(1.0 / rate_hz.max(1.0)),
        }
    }
}

impl OrientationSource for SimulatedOrientation {
    fn subscribe(&mut self) -> Result<Subscription<OrientationSample>, SensorError> {
        let (publisher, subscription) = Subscription::channel();
        self.runtime.spawn(sway_loop(publisher, self.period));
        tracing::debug!("Simulated orientation subscribed");
        Ok(subscription)
    }
}

/// Sample at time `t` seconds: a slow look-around near the upright pose.
pub fn sway_at(t: f32) -> OrientationSample {
    OrientationSample::new(
        10.0 + 10.0 * (0.2 * t).sin(),
        90.0 + 15.0 * (0.5 * t).sin(),
        10.0 * (0.35 * t).sin(),
    )
}

async fn sway_loop(publisher: Publisher<OrientationSample>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    let start = tokio::time::Instant::now();

    loop {
        tokio::select! {
            _ = publisher.closed() => break,
            _ = interval.tick() => {
                let t = start.elapsed().as_secs_f32();
                if !publisher.publish(sway_at(t)) {
                    break;
                }
            }
        }
    }
    tracing::debug!("Simulated orientation unsubscribed");
}
