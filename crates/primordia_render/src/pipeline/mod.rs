//! Rendering pipeline components
//!
//! A single instanced render pipeline draws the simulation background and
//! every particle.

pub mod types;
pub mod particle_pipeline;

// Re-export types
pub use types::{CameraUniforms, ParticleInstance, QUAD_VERTEX_COUNT, SHAPE_DISC, SHAPE_RECT};

// Re-export pipelines
pub use particle_pipeline::ParticlePipeline;
