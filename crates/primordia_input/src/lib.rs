//! 2D Viewport Input Handling
//!
//! This crate provides zoom/pan camera control for the particle viewer.
//! The controller sees every window event before the application does and
//! reports which ones it consumed.

mod camera_controller;

pub use camera_controller::{CameraController, CameraControl};
