//! Application systems
//!
//! The pieces of the viewer shell, kept apart from main.rs so they can be tested.

mod render;
mod simulation;
mod timing;
mod window;

pub use render::{RenderError, RenderSystem};
pub use simulation::{ActionOutcome, SimulationSystem};
pub use timing::{FrameLimiter, FrameTimer};
pub use window::{WindowError, WindowSystem};
