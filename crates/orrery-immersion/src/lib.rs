//! Immersive-mode controller for the orrery scene.
//!
//! [`ImmersionController`] ties together sensor permission, orientation
//! smoothing, voice focus and fullscreen display behind an
//! `Inactive`/`Active` state machine. Renderers read its output through
//! [`ImmersionController::snapshot`].

pub mod controller;
pub mod error;

pub use controller::{ImmersionController, ImmersionState};
pub use error::{Fault, ImmersionError};
