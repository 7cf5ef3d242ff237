use crate::ImmersionCommand;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Maps keyboard presses to immersion commands.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    pub toggle: KeyCode,
    pub enter: KeyCode,
    pub exit: KeyCode,
    pub request_permission: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle: KeyCode::F11,
            enter: KeyCode::Enter,
            exit: KeyCode::Escape,
            request_permission: KeyCode::KeyP,
        }
    }
}

impl KeyBindings {
    /// Resolve a key event. Only presses produce commands; releases and
    /// unbound keys yield `None`.
    pub fn command_for(&self, key: PhysicalKey, state: ElementState) -> Option<ImmersionCommand> {
        if state != ElementState::Pressed {
            return None;
        }
        let PhysicalKey::Code(code) = key else {
            return None;
        };

        if code == self.toggle {
            Some(ImmersionCommand::Toggle)
        } else if code == self.enter {
            Some(ImmersionCommand::Enter)
        } else if code == self.exit {
            Some(ImmersionCommand::Exit)
        } else if code == self.request_permission {
            Some(ImmersionCommand::RequestPermission)
        } else {
            None
        }
    }
}
