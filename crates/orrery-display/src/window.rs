use crate::{DisplayError, DisplayProvider, OrientationLock};
use std::sync::Arc;
use tracing::info;
use winit::window::{Fullscreen, Window};

/// Desktop window display: borderless fullscreen on the current monitor.
///
/// Desktop windows cannot pin the screen orientation, so locks report
/// `Unsupported`.
pub struct WindowDisplay {
    window: Arc<Window>,
}

impl WindowDisplay {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl DisplayProvider for WindowDisplay {
    fn request_fullscreen(&mut self) -> Result<(), DisplayError> {
        let monitor = self.window.current_monitor();
        self.window.set_fullscreen(Some(Fullscreen::Borderless(monitor)));
        info!("Window fullscreen requested");
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), DisplayError> {
        self.window.set_fullscreen(None);
        info!("Window fullscreen released");
        Ok(())
    }

    fn lock_orientation(&mut self, _lock: OrientationLock) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported("orientation lock"))
    }

    fn unlock_orientation(&mut self) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported("orientation lock"))
    }
}
