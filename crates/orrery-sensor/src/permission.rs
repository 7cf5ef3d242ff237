use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

/// Outcome of negotiating access to the orientation sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

#[derive(Debug, Error)]
pub enum ConsentError {
    #[error("Consent prompt failed: {0}")]
    Prompt(String),
    #[error("Consent prompt is not available in this context")]
    NotAllowed,
}

/// Platform hook that asks the user for sensor access.
///
/// Only platforms with a consent model provide one.
#[async_trait(?Send)]
pub trait ConsentPrompt {
    /// `Ok(true)` only on an explicit affirmative answer.
    async fn request(&mut self) -> Result<bool, ConsentError>;
}

/// Negotiates runtime access to the orientation sensor.
pub struct PermissionGate {
    prompt: Option<Box<dyn ConsentPrompt>>,
    state: PermissionState,
}

impl PermissionGate {
    /// `None` means the platform has no consent model and access is implicit.
    pub fn new(prompt: Option<Box<dyn ConsentPrompt>>) -> Self {
        Self {
            prompt,
            state: PermissionState::Unknown,
        }
    }

    pub fn state(&self) -> PermissionState {
        self.state
    }

    pub fn is_granted(&self) -> bool {
        self.state == PermissionState::Granted
    }

    /// Ask for access. A grant is remembered and never re-prompted; a denial
    /// is asked again on the next call. A failing prompt counts as a denial.
    pub async fn request(&mut self) -> PermissionState {
        if self.state == PermissionState::Granted {
            return self.state;
        }

        self.state = match self.prompt.as_mut() {
            None => PermissionState::Granted,
            Some(prompt) => match prompt.request().await {
                Ok(true) => PermissionState::Granted,
                Ok(false) => PermissionState::Denied,
                Err(e) => {
                    warn!(?e, "Orientation consent prompt failed, treating as denied");
                    PermissionState::Denied
                }
            },
        };

        info!(state = ?self.state, "Orientation permission resolved");
        self.state
    }
}
