//! Window management system
//!
//! Handles window creation, frame pacing, and title updates.

use std::sync::Arc;
use std::time::Instant;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use primordia_sim::SimulationMode;
use crate::config::WindowConfig;
use super::timing::FrameLimiter;

/// Manages the application window and its frame schedule
pub struct WindowSystem {
    window: Arc<Window>,
    limiter: FrameLimiter,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        log::info!(
            "Created {}x{} window, framerate limit {}",
            config.width,
            config.height,
            config.framerate
        );

        Ok(Self {
            window,
            limiter: FrameLimiter::new(config.framerate),
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Inner size in physical pixels
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Request a redraw if the next frame is due; returns whether one was requested
    pub fn begin_frame_if_due(&mut self, now: Instant) -> bool {
        if !self.limiter.is_due(now) {
            return false;
        }
        self.window.request_redraw();
        self.limiter.schedule_next(now);
        true
    }

    /// When the next frame is due
    pub fn next_frame_deadline(&self) -> Instant {
        self.limiter.next_deadline()
    }

    /// Update window title with simulation state
    pub fn update_title(&self, particles: usize, mode: SimulationMode, paused: bool) {
        self.window
            .set_title(&format_title(&self.base_title, particles, mode, paused));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn format_title(base: &str, particles: usize, mode: SimulationMode, paused: bool) -> String {
    let mut title = format!("{} - {} particles [{}]", base, particles, mode.label());
    if paused {
        title.push_str(" [paused]");
    }
    title
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}
