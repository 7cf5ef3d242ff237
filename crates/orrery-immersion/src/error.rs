use orrery_display::DisplayError;
use orrery_sensor::SensorError;
use orrery_voice::SpeechError;
use thiserror::Error;

/// Errors that stop a transition. Only a missing sensor permission does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ImmersionError {
    #[error("Motion sensor access was denied; allow it to use immersive mode")]
    PermissionDenied,
}

/// A problem absorbed while immersive. Each one disables a feature, never
/// immersion itself.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("Display request unavailable: {0}")]
    DisplayApiUnavailable(#[from] DisplayError),
    #[error("Orientation sensor unavailable: {0}")]
    SensorUnavailable(#[from] SensorError),
    #[error("Speech recognition unavailable; voice focus disabled")]
    SpeechUnavailable,
    #[error("Speech session fault: {0}")]
    SpeechSessionFault(SpeechError),
}

impl From<SpeechError> for Fault {
    fn from(e: SpeechError) -> Self {
        match e {
            SpeechError::Unavailable => Fault::SpeechUnavailable,
            other => Fault::SpeechSessionFault(other),
        }
    }
}
