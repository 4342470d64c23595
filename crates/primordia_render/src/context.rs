//! WGPU device, queue and surface management

use std::fmt;
use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Errors raised while bringing up the GPU
#[derive(Debug)]
pub enum ContextError {
    /// The window could not be turned into a surface
    Surface(String),
    /// No adapter can present to the surface
    NoAdapter,
    /// The adapter refused to create a device
    Device(String),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::Surface(msg) => write!(f, "Surface creation failed: {}", msg),
            ContextError::NoAdapter => write!(f, "No suitable GPU adapter found"),
            ContextError::Device(msg) => write!(f, "Device request failed: {}", msg),
        }
    }
}

impl std::error::Error for ContextError {}

/// GPU state tied to one window
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    /// Format frames are rendered through; never sRGB-encoding
    pub view_format: wgpu::TextureFormat,
    pub size: PhysicalSize<u32>,
}

impl RenderContext {
    /// Create a context, choosing the present mode from `vsync`
    pub async fn with_vsync(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| ContextError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(ContextError::NoAdapter)?;

        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Primordia Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| ContextError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let (format, view_format) = select_formats(&caps.formats).ok_or_else(|| {
            ContextError::Surface("surface reports no supported formats".to_string())
        })?;
        log::info!("Surface format {:?}, render view {:?}", format, view_format);

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: caps.alpha_modes[0],
            view_formats: if view_format == format { vec![] } else { vec![view_format] },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            size,
        })
    }

    /// Reconfigure the surface for a new window size
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }
}

/// Pick the surface format and the format to render through
///
/// Colours are written as-is, so the render view must not sRGB-encode them:
/// a plain format is preferred, and an sRGB-only surface is viewed through
/// its non-sRGB twin.
pub fn select_formats(formats: &[wgpu::TextureFormat]) -> Option<(wgpu::TextureFormat, wgpu::TextureFormat)> {
    let surface = formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())?;
    Some((surface, surface.remove_srgb_suffix()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_plain_format() {
        use wgpu::TextureFormat::*;
        let picked = select_formats(&[Bgra8UnormSrgb, Bgra8Unorm, Rgba8Unorm]);
        assert_eq!(picked, Some((Bgra8Unorm, Bgra8Unorm)));
    }

    #[test]
    fn test_srgb_only_surface_rendered_through_plain_view() {
        use wgpu::TextureFormat::*;
        let (surface, view) = select_formats(&[Bgra8UnormSrgb]).unwrap();
        assert_eq!(surface, Bgra8UnormSrgb);
        assert_eq!(view, Bgra8Unorm);
        assert!(!view.is_srgb());
    }

    #[test]
    fn test_no_formats() {
        assert_eq!(select_formats(&[]), None);
    }

    #[test]
    fn test_context_error_display() {
        assert_eq!(ContextError::NoAdapter.to_string(), "No suitable GPU adapter found");
        assert!(ContextError::Device("lost".to_string()).to_string().contains("lost"));
        assert!(ContextError::Surface("bad handle".to_string())
            .to_string()
            .starts_with("Surface creation failed"));
    }
}
