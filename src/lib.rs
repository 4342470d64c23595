//! Primordia - interactive viewer for a self-organising particle system
//!
//! The binary wires these modules to a winit event loop; they are exposed as a
//! library so the configuration and shell logic can be tested without a window.

pub mod config;
pub mod input;
pub mod systems;
