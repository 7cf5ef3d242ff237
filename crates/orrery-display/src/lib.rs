pub mod headless;
pub mod window;

pub use headless::HeadlessDisplay;
pub use window::WindowDisplay;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Screen orientation to hold while immersive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrientationLock {
    Landscape,
    Portrait,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayError {
    #[error("{0} is not supported on this display")]
    Unsupported(&'static str),
    #[error("Display request rejected: {0}")]
    Rejected(String),
}

/// Trait for platform-specific fullscreen and orientation-lock control.
///
/// Every call is a best-effort request; callers log failures and carry on.
pub trait DisplayProvider {
    fn request_fullscreen(&mut self) -> Result<(), DisplayError>;
    fn exit_fullscreen(&mut self) -> Result<(), DisplayError>;
    fn lock_orientation(&mut self, lock: OrientationLock) -> Result<(), DisplayError>;
    fn unlock_orientation(&mut self) -> Result<(), DisplayError>;
}
