pub mod keys;
pub mod subscription;

pub use subscription::{Publisher, Subscription};

/// A user request addressed to the immersion controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmersionCommand {
    /// Enter immersive mode.
    Enter,
    /// Leave immersive mode.
    Exit,
    /// Enter if inactive, exit if active.
    Toggle,
    /// Ask for sensor access without entering.
    RequestPermission,
}
