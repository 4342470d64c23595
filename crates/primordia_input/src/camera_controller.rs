//! Camera controller for zoom/pan viewport input
//!
//! Controls:
//! - Mouse wheel: zoom about the cursor
//! - Right-button drag (configurable): pan
//! - `+` / `-` (main row or keypad): zoom about the cursor
//! - Home: reset the view
//!
//! Everything else (left click, Escape, arrows, letters) passes through to
//! the application.

use primordia_math::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Camera controller for handling viewport input
pub struct CameraController {
    // Drag state
    dragging: bool,
    cursor: Option<Vec2>,

    // Configuration
    /// Zoom factor applied per wheel notch or key press
    pub zoom_step: f32,
    /// Button that pans the view while held
    pub pan_button: MouseButton,
    /// Pixels of `PixelDelta` scroll equivalent to one wheel notch
    pub pixels_per_line: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            dragging: false,
            cursor: None,

            zoom_step: 1.1,
            pan_button: MouseButton::Right,
            pixels_per_line: 100.0,
        }
    }

    /// Offer a window event to the camera
    ///
    /// Returns `true` when the event was consumed and must not be handled
    /// further. Cursor motion is always tracked, but only consumed while
    /// dragging.
    pub fn handle_window_event<C: CameraControl>(&mut self, camera: &mut C, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.process_cursor_moved(camera, position.x as f32, position.y as f32)
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.dragging = false;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / self.pixels_per_line,
                };
                self.process_scroll(camera, notches)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.process_mouse_button(*button, *state)
            }
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(key) => self.process_keyboard(camera, key, event.state),
                PhysicalKey::Unidentified(_) => false,
            },
            _ => false,
        }
    }

    /// Process cursor movement in window pixels
    pub fn process_cursor_moved<C: CameraControl>(&mut self, camera: &mut C, x: f32, y: f32) -> bool {
        let now = Vec2::new(x, y);
        let previous = self.cursor.replace(now);
        if !self.dragging {
            return false;
        }
        if let Some(previous) = previous {
            let delta = now - previous;
            camera.pan_pixels(delta.x, delta.y);
        }
        true
    }

    /// Process scrolling, in wheel notches (positive zooms in)
    pub fn process_scroll<C: CameraControl>(&mut self, camera: &mut C, notches: f32) -> bool {
        if notches == 0.0 {
            return true;
        }
        camera.zoom(self.zoom_step.powf(notches), self.cursor);
        true
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) -> bool {
        if button != self.pan_button {
            return false;
        }
        self.dragging = state == ElementState::Pressed;
        true
    }

    /// Process keyboard input
    pub fn process_keyboard<C: CameraControl>(&mut self, camera: &mut C, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;
        match key {
            KeyCode::Equal | KeyCode::NumpadAdd => {
                if pressed {
                    camera.zoom(self.zoom_step, self.cursor);
                }
                true
            }
            KeyCode::Minus | KeyCode::NumpadSubtract => {
                if pressed {
                    camera.zoom(1.0 / self.zoom_step, self.cursor);
                }
                true
            }
            KeyCode::Home => {
                if pressed {
                    camera.reset_view();
                }
                true
            }
            _ => false,
        }
    }

    /// Last cursor position in window pixels, if the cursor is over the window
    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Check if a pan drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Builder: set zoom factor per step
    pub fn with_zoom_step(mut self, step: f32) -> Self {
        self.zoom_step = step;
        self
    }

    /// Builder: set the pan button
    pub fn with_pan_button(mut self, button: MouseButton) -> Self {
        self.pan_button = button;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    /// Shift the view so content follows a drag of `(dx, dy)` pixels
    fn pan_pixels(&mut self, dx: f32, dy: f32);
    /// Scale the zoom by `factor`, keeping the world point under `anchor` fixed
    /// (viewport centre when `None`)
    fn zoom(&mut self, factor: f32, anchor: Option<Vec2>);
    /// Return to the initial view
    fn reset_view(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCamera {
        pans: Vec<(f32, f32)>,
        zooms: Vec<(f32, Option<Vec2>)>,
        resets: usize,
    }

    impl CameraControl for RecordingCamera {
        fn pan_pixels(&mut self, dx: f32, dy: f32) {
            self.pans.push((dx, dy));
        }
        fn zoom(&mut self, factor: f32, anchor: Option<Vec2>) {
            self.zooms.push((factor, anchor));
        }
        fn reset_view(&mut self) {
            self.resets += 1;
        }
    }

    #[test]
    fn test_cursor_tracked_but_not_consumed() {
        let mut controller = CameraController::new();
        let mut camera = RecordingCamera::default();

        assert!(!controller.process_cursor_moved(&mut camera, 10.0, 20.0));
        assert_eq!(controller.cursor_position(), Some(Vec2::new(10.0, 20.0)));
        assert!(camera.pans.is_empty());
    }

    #[test]
    fn test_drag_pans() {
        let mut controller = CameraController::new();
        let mut camera = RecordingCamera::default();

        controller.process_cursor_moved(&mut camera, 10.0, 10.0);
        assert!(controller.process_mouse_button(MouseButton::Right, ElementState::Pressed));
        assert!(controller.is_dragging());
        assert!(controller.process_cursor_moved(&mut camera, 15.0, 7.0));
        assert_eq!(camera.pans, vec![(5.0, -3.0)]);

        controller.process_mouse_button(MouseButton::Right, ElementState::Released);
        assert!(!controller.process_cursor_moved(&mut camera, 30.0, 30.0));
        assert_eq!(camera.pans.len(), 1);
    }

    #[test]
    fn test_left_click_passes_through() {
        let mut controller = CameraController::new();
        assert!(!controller.process_mouse_button(MouseButton::Left, ElementState::Pressed));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_pan_button_configurable() {
        let mut controller = CameraController::new().with_pan_button(MouseButton::Middle);
        assert!(!controller.process_mouse_button(MouseButton::Right, ElementState::Pressed));
        assert!(controller.process_mouse_button(MouseButton::Middle, ElementState::Pressed));
    }

    #[test]
    fn test_scroll_zooms_at_cursor() {
        let mut controller = CameraController::new().with_zoom_step(2.0);
        let mut camera = RecordingCamera::default();

        assert!(controller.process_scroll(&mut camera, 1.0));
        assert_eq!(camera.zooms, vec![(2.0, None)]);

        controller.process_cursor_moved(&mut camera, 4.0, 8.0);
        controller.process_scroll(&mut camera, -1.0);
        assert_eq!(camera.zooms[1], (0.5, Some(Vec2::new(4.0, 8.0))));
    }

    #[test]
    fn test_zoom_keys() {
        let mut controller = CameraController::new().with_zoom_step(2.0);
        let mut camera = RecordingCamera::default();

        assert!(controller.process_keyboard(&mut camera, KeyCode::Equal, ElementState::Pressed));
        assert!(controller.process_keyboard(&mut camera, KeyCode::NumpadSubtract, ElementState::Pressed));
        // Releases are consumed but do nothing
        assert!(controller.process_keyboard(&mut camera, KeyCode::Equal, ElementState::Released));
        assert_eq!(camera.zooms, vec![(2.0, None), (0.5, None)]);

        assert!(controller.process_keyboard(&mut camera, KeyCode::Home, ElementState::Pressed));
        assert_eq!(camera.resets, 1);
    }

    #[test]
    fn test_application_keys_pass_through() {
        let mut controller = CameraController::new();
        let mut camera = RecordingCamera::default();

        for key in [KeyCode::Escape, KeyCode::KeyP, KeyCode::ArrowUp, KeyCode::ArrowDown, KeyCode::KeyM] {
            assert!(
                !controller.process_keyboard(&mut camera, key, ElementState::Pressed),
                "Key {:?} should not be consumed",
                key
            );
        }
        assert!(camera.zooms.is_empty());
    }
}
