//! GPU-compatible data types for the particle pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

/// Instance drawn as an axis-aligned rectangle anchored at its top-left corner
pub const SHAPE_RECT: u32 = 0;
/// Instance drawn as a disc centred on its position
pub const SHAPE_DISC: u32 = 1;

/// One instanced quad
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// World position (top-left for rectangles, centre for discs)
    pub position: [f32; 2],
    /// World-space width and height
    pub size: [f32; 2],
    /// RGBA color
    pub color: [f32; 4],
    /// `SHAPE_RECT` or `SHAPE_DISC`
    pub shape: u32,
    /// Padding to align to 16 bytes
    pub _padding: [u32; 3],
}

impl ParticleInstance {
    /// Filled rectangle from `origin` spanning `size`
    pub fn rect(origin: [f32; 2], size: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position: origin,
            size,
            color,
            shape: SHAPE_RECT,
            _padding: [0; 3],
        }
    }

    /// Disc of `radius` around `center`
    pub fn disc(center: [f32; 2], radius: f32, color: [f32; 4]) -> Self {
        Self {
            position: center,
            size: [radius * 2.0, radius * 2.0],
            color,
            shape: SHAPE_DISC,
            _padding: [0; 3],
        }
    }
}

/// Camera uniforms for the particle pass
/// Layout: 64 bytes (must match particle.wgsl CameraUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniforms {
    /// World-to-clip matrix, column major
    pub view_projection: [[f32; 4]; 4],
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self {
            view_projection: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }
}

/// Vertices per instanced quad (two triangles)
pub const QUAD_VERTEX_COUNT: u32 = 6;

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_particle_instance_size() {
        // 2 + 2 + 4 floats + 1 u32 shape + 3 u32 padding = 12 words = 48 bytes
        assert_eq!(size_of::<ParticleInstance>(), 48);
    }

    #[test]
    fn test_camera_uniforms_size() {
        assert_eq!(size_of::<CameraUniforms>(), 64);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<ParticleInstance>(), 4);
        assert_eq!(std::mem::align_of::<CameraUniforms>(), 4);
    }

    #[test]
    fn test_disc_size_is_diameter() {
        let disc = ParticleInstance::disc([1.0, 2.0], 0.75, [1.0; 4]);
        assert_eq!(disc.size, [1.5, 1.5]);
        assert_eq!(disc.shape, SHAPE_DISC);
        assert_eq!(ParticleInstance::rect([0.0; 2], [1.0; 2], [1.0; 4]).shape, SHAPE_RECT);
    }
}
