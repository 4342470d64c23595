//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The instanced particle pipeline
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use primordia_math::Bound2;
use primordia_render::{
    context::{ContextError, RenderContext},
    pipeline::{CameraUniforms, ParticlePipeline},
    Camera2D, RenderableParticles,
};
use primordia_sim::Particle;
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU initialisation failed
    Init(ContextError),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Init(e) => write!(f, "Renderer initialisation failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Init(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: ParticlePipeline,
    /// Reused instance list
    renderable: RenderableParticles,
    render_config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let pipeline = ParticlePipeline::new(&context.device, context.view_format);

        Ok(Self {
            context,
            pipeline,
            renderable: RenderableParticles::new(),
            render_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// Reconfigure the surface at its current size
    pub fn reconfigure(&mut self) {
        let size = self.context.size;
        self.context.resize(size);
    }

    /// Render a single frame: clear, background rectangle, then particles
    pub fn render_frame(
        &mut self,
        camera: &Camera2D,
        bound: Bound2,
        particles: &[Particle],
    ) -> Result<(), RenderError> {
        self.renderable.rebuild(
            bound,
            self.render_config.background_color,
            particles,
            self.render_config.particle_radius,
        );
        self.pipeline.upload_instances(
            &self.context.device,
            &self.context.queue,
            &self.renderable.instances,
        );
        self.pipeline.update_camera(
            &self.context.queue,
            &CameraUniforms {
                view_projection: camera.view_projection(),
            },
        );

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        // Colours are stored unencoded so (128, 128, 128) reaches the screen as-is
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.context.view_format),
            ..Default::default()
        });

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline
            .render(&mut encoder, &view, to_wgpu_color(self.render_config.clear_color));

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn to_wgpu_color(c: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: c[0] as f64,
        g: c[1] as f64,
        b: c[2] as f64,
        a: c[3] as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
        assert_eq!(
            format!("{}", RenderError::from(ContextError::NoAdapter)),
            "Renderer initialisation failed: No suitable GPU adapter found"
        );
    }

    #[test]
    fn test_default_clear_color_is_mid_gray() {
        let color = to_wgpu_color(RenderingConfig::default().clear_color);
        // Written through a non-sRGB view, the stored byte is round(r * 255)
        assert_eq!((color.r * 255.0).round() as u8, 128);
        assert_eq!(color.r, color.g);
        assert_eq!(color.g, color.b);
        assert_eq!(color.a, 1.0);
    }
}
