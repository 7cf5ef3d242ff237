use crate::error::{Fault, ImmersionError};
use orrery_config::{AppConfig, PresentationConfig, ViewConfig};
use orrery_display::{DisplayProvider, OrientationLock};
use orrery_input::{ImmersionCommand, Subscription};
use orrery_scene::{CelestialBody, RenderSnapshot, ViewTransform};
use orrery_sensor::{
    OrientationSample, OrientationSmoother, OrientationSource, PermissionGate, PermissionState,
    SensorError, SmoothedOrientation,
};
use orrery_voice::{SpeechEngine, VoiceCommandResolver};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImmersionState {
    #[default]
    Inactive,
    Active,
}

/// Immersive-mode state machine.
///
/// Owns the orientation and speech subscriptions for exactly as long as it
/// is `Active`, and exposes the resulting view transform and focus target
/// for the renderer to pull each frame. All calls are expected on the one
/// event-loop thread.
pub struct ImmersionController {
    view: ViewConfig,
    presentation: PresentationConfig,
    focused_scale: f32,

    state: ImmersionState,
    permission: PermissionGate,
    display: Box<dyn DisplayProvider>,
    sensor: Box<dyn OrientationSource>,
    orientation: Option<Subscription<OrientationSample>>,
    smoother: OrientationSmoother,
    /// Whether any sample arrived this session. The first one seeds the
    /// smoother instead of pulling it from level.
    sensed: bool,
    voice: VoiceCommandResolver,

    faults: Vec<Fault>,
    last_tick: Option<Instant>,
}

impl ImmersionController {
    pub fn new(
        config: &AppConfig,
        permission: PermissionGate,
        display: Box<dyn DisplayProvider>,
        sensor: Box<dyn OrientationSource>,
        speech: Option<Box<dyn SpeechEngine>>,
    ) -> Self {
        Self {
            view: config.view,
            presentation: config.presentation,
            focused_scale: config.focus.focused_scale,
            state: ImmersionState::Inactive,
            permission,
            display,
            sensor,
            orientation: None,
            smoother: OrientationSmoother::new(&config.smoothing),
            sensed: false,
            voice: VoiceCommandResolver::new(speech, &config.speech, &config.focus),
            faults: Vec::new(),
            last_tick: None,
        }
    }

    /// Enter immersive mode.
    ///
    /// Refused with `PermissionDenied` if sensor access is not granted.
    /// Display, sensor and speech problems are absorbed into [`faults`](Self::faults).
    pub async fn enter(&mut self) -> Result<(), ImmersionError> {
        if self.state == ImmersionState::Active {
            return Ok(());
        }

        if self.permission.request().await != PermissionState::Granted {
            warn!("Immersive mode refused: orientation permission denied");
            return Err(ImmersionError::PermissionDenied);
        }

        self.faults.clear();

        if self.presentation.fullscreen {
            if let Err(e) = self.display.request_fullscreen() {
                self.absorb(e.into());
            }
        }
        if self.presentation.lock_landscape {
            if let Err(e) = self.display.lock_orientation(OrientationLock::Landscape) {
                self.absorb(e.into());
            }
        }

        match self.sensor.subscribe() {
            Ok(subscription) => self.orientation = Some(subscription),
            Err(e) => self.absorb(e.into()),
        }
        if let Err(e) = self.voice.start() {
            self.absorb(e.into());
        }

        self.sensed = false;
        self.last_tick = None;
        self.state = ImmersionState::Active;
        info!(
            sensor = self.orientation.is_some(),
            voice = self.voice.is_active(),
            "Immersive mode entered"
        );
        Ok(())
    }

    /// Leave immersive mode. Always succeeds.
    pub fn exit(&mut self) {
        if self.state == ImmersionState::Inactive {
            return;
        }

        if self.presentation.fullscreen {
            if let Err(e) = self.display.exit_fullscreen() {
                self.absorb(e.into());
            }
        }
        if self.presentation.lock_landscape {
            if let Err(e) = self.display.unlock_orientation() {
                self.absorb(e.into());
            }
        }

        self.orientation = None;
        self.voice.stop();
        self.smoother.reset();
        self.sensed = false;
        self.state = ImmersionState::Inactive;
        info!("Immersive mode exited");
    }

    /// Ask for sensor access without entering.
    pub async fn request_permission(&mut self) -> PermissionState {
        self.permission.request().await
    }

    pub async fn handle(&mut self, command: ImmersionCommand) -> Result<(), ImmersionError> {
        match command {
            ImmersionCommand::Enter => self.enter().await,
            ImmersionCommand::Exit => {
                self.exit();
                Ok(())
            }
            ImmersionCommand::Toggle => match self.state {
                ImmersionState::Inactive => self.enter().await,
                ImmersionState::Active => {
                    self.exit();
                    Ok(())
                }
            },
            ImmersionCommand::RequestPermission => match self.request_permission().await {
                PermissionState::Denied => Err(ImmersionError::PermissionDenied),
                _ => Ok(()),
            },
        }
    }

    /// Pump pending events and advance time.
    ///
    /// Drains sensor samples and speech events in arrival order, steps the
    /// orientation spring by the time since the previous tick, and expires
    /// the focus target.
    pub fn tick(&mut self, now: Instant) {
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        if self.state != ImmersionState::Active {
            return;
        }

        if let Some(subscription) = self.orientation.as_mut() {
            for sample in subscription.drain() {
                if self.sensed {
                    self.smoother.ingest(&sample);
                } else {
                    self.smoother.seed(&sample);
                    self.sensed = true;
                }
            }
            if subscription.is_finished() {
                self.orientation = None;
                self.absorb(SensorError::Source("orientation stream ended".into()).into());
            }
        }

        for fault in self.voice.pump(now) {
            self.absorb(fault.into());
        }

        self.smoother.tick(dt);
        self.voice.expire(now);
    }

    pub fn state(&self) -> ImmersionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ImmersionState::Active
    }

    pub fn permission(&self) -> PermissionState {
        self.permission.state()
    }

    /// Scene rotation; identity unless active and the sensor has reported.
    pub fn view_transform(&self) -> ViewTransform {
        if self.is_active() && self.sensed {
            self.smoother.value().view_transform(&self.view)
        } else {
            ViewTransform::IDENTITY
        }
    }

    pub fn smoothed_orientation(&self) -> SmoothedOrientation {
        self.smoother.value()
    }

    pub fn focus(&self) -> Option<CelestialBody> {
        self.voice.focus()
    }

    /// Whether a recognition session is running.
    pub fn voice_active(&self) -> bool {
        self.voice.is_active()
    }

    /// Whether orientation samples are being received.
    pub fn sensor_active(&self) -> bool {
        self.orientation.is_some()
    }

    /// Problems absorbed since the last `enter`.
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let focus = self.focus();
        RenderSnapshot {
            immersive: self.is_active(),
            view: self.view_transform(),
            focus,
            scene_scale: if self.is_active() {
                self.presentation.immersive_scene_scale
            } else {
                1.0
            },
            focus_scale: if focus.is_some() {
                self.focused_scale
            } else {
                1.0
            },
        }
    }

    fn absorb(&mut self, fault: Fault) {
        match &fault {
            Fault::SpeechUnavailable => debug!(%fault, "Degraded"),
            _ => warn!(%fault, "Degraded"),
        }
        self.faults.push(fault);
    }
}
