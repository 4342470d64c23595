//! 2D Particle Rendering Library
//!
//! This crate provides the wgpu-based rendering for the Primordia viewer.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera2d::Camera2D`] - Zoom/pan camera with pixel-to-world mapping
//! - [`pipeline::ParticlePipeline`] - Instanced quads for background and particles
//! - [`renderable::RenderableParticles`] - Converts simulation state to instances

pub mod context;
pub mod camera2d;
pub mod pipeline;
pub mod renderable;

pub use camera2d::Camera2D;
pub use renderable::RenderableParticles;
