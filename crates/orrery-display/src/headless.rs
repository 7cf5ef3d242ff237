use crate::{DisplayError, DisplayProvider, OrientationLock};
use tracing::info;

/// Display without a real screen behind it.
///
/// Records what was requested so callers (and tests) can inspect it.
/// Orientation locking can be switched off to mimic desktop platforms.
#[derive(Debug)]
pub struct HeadlessDisplay {
    fullscreen: bool,
    lock: Option<OrientationLock>,
    supports_lock: bool,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self {
            fullscreen: false,
            lock: None,
            supports_lock: true,
        }
    }

    /// A display that rejects orientation locks.
    pub fn without_orientation_lock() -> Self {
        Self {
            supports_lock: false,
            ..Self::new()
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn orientation_lock(&self) -> Option<OrientationLock> {
        self.lock
    }
}

impl Default for HeadlessDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayProvider for HeadlessDisplay {
    fn request_fullscreen(&mut self) -> Result<(), DisplayError> {
        self.fullscreen = true;
        info!("Fullscreen entered (headless)");
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), DisplayError> {
        self.fullscreen = false;
        info!("Fullscreen exited (headless)");
        Ok(())
    }

    fn lock_orientation(&mut self, lock: OrientationLock) -> Result<(), DisplayError> {
        if !self.supports_lock {
            return Err(DisplayError::Unsupported("orientation lock"));
        }
        self.lock = Some(lock);
        info!(?lock, "Orientation locked (headless)");
        Ok(())
    }

    fn unlock_orientation(&mut self) -> Result<(), DisplayError> {
        if !self.supports_lock {
            return Err(DisplayError::Unsupported("orientation lock"));
        }
        self.lock = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_requests() {
        let mut display = HeadlessDisplay::new();
        display.request_fullscreen().unwrap();
        display.lock_orientation(OrientationLock::Landscape).unwrap();
        assert!(display.is_fullscreen());
        assert_eq!(display.orientation_lock(), Some(OrientationLock::Landscape));

        display.exit_fullscreen().unwrap();
        display.unlock_orientation().unwrap();
        assert!(!display.is_fullscreen());
        assert_eq!(display.orientation_lock(), None);
    }

    #[test]
    fn later_lock_replaces_earlier() {
        let mut display = HeadlessDisplay::default();
        display.lock_orientation(OrientationLock::Portrait).unwrap();
        display.lock_orientation(OrientationLock::Landscape).unwrap();
        assert_eq!(display.orientation_lock(), Some(OrientationLock::Landscape));
    }

    #[test]
    fn lock_can_be_unsupported() {
        let mut display = HeadlessDisplay::without_orientation_lock();
        assert_eq!(
            display.lock_orientation(OrientationLock::Landscape),
            Err(DisplayError::Unsupported("orientation lock"))
        );
        assert_eq!(display.orientation_lock(), None);
    }
}
