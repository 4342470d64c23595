//! Primordial particle system simulation for Primordia
//!
//! This crate owns the particle population and its stepping rule:
//! - Self-propelled particles that turn by `alpha + beta * N * sign(R - L)`
//!   where `L`/`R` count neighbours left/right of the heading
//! - Uniform spatial grid for neighbour lookup
//! - Toroidal or walled simulation bound, adjustable at runtime
//! - Parallel stepping on a fixed-size worker pool

pub mod config;
pub mod error;
pub mod grid;
pub mod manager;
pub mod particle;

use primordia_math::{Bound2, Vec2};

// Re-export commonly used types
pub use config::{DispatchConfig, ReactionParams, SimulationConfig, CLOSE_RADIUS_FRACTION};
pub use error::SimError;
pub use grid::SpatialGrid;
pub use manager::{ParticleManager, SimulationMode};
pub use particle::{Particle, ParticleClass};

/// The operations a viewer needs from a particle simulation
///
/// Lets the application shell drive any simulation backend.
pub trait ParticleSimulation {
    /// Advance one tick
    fn update(&mut self);
    /// Current population, for drawing
    fn particles(&self) -> &[Particle];
    /// Add up to `count` particles around `point`; returns how many were added
    fn spawn_cells(&mut self, point: Vec2, count: usize) -> usize;
    /// Grow the bound one step and return the new bound
    fn increase_simulation_bound(&mut self) -> Bound2;
    /// Shrink the bound one step and return the new bound
    fn reduce_simulation_bound(&mut self) -> Bound2;
    fn simulation_bound(&self) -> Bound2;
    /// Toggle the edge mode and return the new one
    fn change_mode(&mut self) -> SimulationMode;
    fn mode(&self) -> SimulationMode;
}
