//! Input mapping from raw events to semantic actions
//!
//! Maps the viewer's command keys and the spawn click to high-level actions.
//! Zoom and pan input is NOT mapped here - it goes to the CameraController first.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Close the window (Escape)
    Exit,
    /// Pause or resume stepping (P)
    TogglePause,
    /// Grow the simulation bound (Up)
    IncreaseBound,
    /// Shrink the simulation bound (Down)
    ReduceBound,
    /// Switch between wrapping and walled edges (M)
    ChangeMode,
    /// Drop a batch of particles under the cursor (left click)
    Spawn,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Only presses produce actions; releases and unbound keys return `None`.
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyP => Some(InputAction::TogglePause),
            KeyCode::ArrowUp => Some(InputAction::IncreaseBound),
            KeyCode::ArrowDown => Some(InputAction::ReduceBound),
            KeyCode::KeyM => Some(InputAction::ChangeMode),
            _ => None,
        }
    }

    /// Map mouse button to an action
    pub fn map_mouse_button(button: MouseButton, state: ElementState) -> Option<InputAction> {
        if button == MouseButton::Left && state == ElementState::Pressed {
            Some(InputAction::Spawn)
        } else {
            None
        }
    }
}
