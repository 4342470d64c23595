//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `<dir>/default.toml` (version controlled)
//! 2. `<dir>/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PRIM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use primordia_math::{Bound2, Vec2};
use primordia_sim::{DispatchConfig, ReactionParams};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Particle simulation configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from the default `config` directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // PRIM_SIMULATION__ALPHA=90 -> simulation.alpha = 90
        figment = figment.merge(Env::prefixed("PRIM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Frame rate limit (0 = unlimited)
    pub framerate: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Primordia - Particle Reactor".to_string(),
            width: 1280,
            height: 720,
            framerate: 60,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Particle simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Distance a particle travels per tick
    pub particle_speed: f32,
    /// Fixed turn per tick in degrees
    pub alpha: f32,
    /// Turn per neighbour per tick in degrees
    pub beta: f32,
    /// Neighbourhood radius
    pub react_radius: f32,
    /// Initial simulation bound [x, y]
    pub bound: [f32; 2],
    /// Worker threads used for stepping
    pub thread_number: usize,
    /// Particles per work chunk
    pub threads_per_block: usize,
    /// Particle capacity
    pub max_particles: usize,
    /// Bound change per Up/Down press [x, y]
    pub bound_step: [f32; 2],
    /// Radius of the disc clicked particles are scattered in
    pub spawn_radius: f32,
    /// Particles added per click
    pub spawn_count: usize,
    /// RNG seed for reproducible spawning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Start with stepping paused
    pub start_paused: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_speed: 0.67,
            alpha: 180.0,
            beta: 17.0,
            react_radius: 5.0,
            bound: [400.0, 400.0],
            thread_number: 4,
            threads_per_block: 256,
            max_particles: 100_000,
            bound_step: [25.0, 25.0],
            spawn_radius: 15.0,
            spawn_count: 500,
            seed: None,
            start_paused: false,
        }
    }
}

impl SimulationConfig {
    /// Convert to the simulation engine's configuration
    pub fn to_engine_config(&self) -> primordia_sim::SimulationConfig {
        primordia_sim::SimulationConfig {
            params: ReactionParams {
                particle_speed: self.particle_speed,
                alpha: self.alpha,
                beta: self.beta,
                react_radius: self.react_radius,
            },
            dispatch: DispatchConfig {
                thread_number: self.thread_number,
                threads_per_block: self.threads_per_block,
            },
            bound: Bound2::from(self.bound),
            max_particles: self.max_particles,
            bound_step: Vec2::from(self.bound_step),
            spawn_radius: self.spawn_radius,
            seed: self.seed,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Frame the simulation bound on startup instead of a 1:1 pixel view
    pub fit_to_bound: bool,
    /// Minimum zoom (pixels per world unit)
    pub min_zoom: f32,
    /// Maximum zoom (pixels per world unit)
    pub max_zoom: f32,
    /// Zoom factor per wheel notch
    pub zoom_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fit_to_bound: true,
            min_zoom: 0.05,
            max_zoom: 50.0,
            zoom_step: 1.1,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Frame clear color [r, g, b, a]
    pub clear_color: [f32; 4],
    /// Simulation background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Drawn particle radius in world units
    pub particle_radius: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            clear_color: [128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0],
            background_color: [1.0, 1.0, 1.0, 1.0],
            particle_radius: 1.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level used when `RUST_LOG` is not set (error, warn, info, debug, trace)
    pub log_level: String,
    /// Report every frame's wall time at debug level
    pub log_frame_time: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_frame_time: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.framerate, 60);
        assert_eq!(config.simulation.spawn_count, 500);
        assert_eq!(config.rendering.background_color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_defaults_produce_valid_engine_config() {
        let engine = AppConfig::default().simulation.to_engine_config();
        assert!(engine.validate().is_ok());
        assert_eq!(engine.bound, Bound2::new(400.0, 400.0));
        assert_eq!(engine.dispatch.threads_per_block, 256);
        assert_eq!(engine.params.beta, 17.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("react_radius"));
        assert!(toml.contains("threads_per_block"));
        assert!(!toml.contains("seed"));
    }

    #[test]
    fn test_missing_directory_gives_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.simulation.alpha, 180.0);
    }
}
