//! Simulation configuration

use primordia_math::{Bound2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Motion and reaction parameters of the primordial particle system
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionParams {
    /// Distance travelled per tick
    pub particle_speed: f32,
    /// Fixed turn per tick, in degrees
    pub alpha: f32,
    /// Turn per neighbour per tick, in degrees
    pub beta: f32,
    /// Neighbourhood radius
    pub react_radius: f32,
}

impl Default for ReactionParams {
    fn default() -> Self {
        Self {
            particle_speed: 0.67,
            alpha: 180.0,
            beta: 17.0,
            react_radius: 5.0,
        }
    }
}

impl ReactionParams {
    /// Alpha in radians
    #[inline]
    pub fn alpha_radians(&self) -> f32 {
        self.alpha.to_radians()
    }

    /// Beta in radians
    #[inline]
    pub fn beta_radians(&self) -> f32 {
        self.beta.to_radians()
    }

    /// Radius under which a neighbour counts as close
    #[inline]
    pub fn close_radius(&self) -> f32 {
        self.react_radius * CLOSE_RADIUS_FRACTION
    }
}

/// Close neighbours are those within this fraction of the reaction radius
pub const CLOSE_RADIUS_FRACTION: f32 = 0.26;

/// How stepping work is split across the worker pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Worker threads in the stepping pool
    pub thread_number: usize,
    /// Particles processed per work chunk
    pub threads_per_block: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            thread_number: 4,
            threads_per_block: 256,
        }
    }
}

/// Full configuration for a [`crate::ParticleManager`]
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub params: ReactionParams,
    pub dispatch: DispatchConfig,
    /// Initial simulation bound
    pub bound: Bound2,
    /// Hard cap on the particle population
    pub max_particles: usize,
    /// Amount the bound grows or shrinks per adjustment
    pub bound_step: Vec2,
    /// Radius of the disc new particles are scattered in
    pub spawn_radius: f32,
    /// Seed for spawn placement; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            params: ReactionParams::default(),
            dispatch: DispatchConfig::default(),
            bound: Bound2::new(250.0, 250.0),
            max_particles: 100_000,
            bound_step: Vec2::new(25.0, 25.0),
            spawn_radius: 15.0,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Builder: set reaction parameters
    pub fn with_params(mut self, params: ReactionParams) -> Self {
        self.params = params;
        self
    }

    /// Builder: set thread pool dispatch
    pub fn with_dispatch(mut self, thread_number: usize, threads_per_block: usize) -> Self {
        self.dispatch = DispatchConfig {
            thread_number,
            threads_per_block,
        };
        self
    }

    /// Builder: set initial bound
    pub fn with_bound(mut self, bound: Bound2) -> Self {
        self.bound = bound;
        self
    }

    /// Builder: set particle capacity
    pub fn with_max_particles(mut self, max_particles: usize) -> Self {
        self.max_particles = max_particles;
        self
    }

    /// Builder: set bound adjustment step
    pub fn with_bound_step(mut self, step: Vec2) -> Self {
        self.bound_step = step;
        self
    }

    /// Builder: set spawn radius
    pub fn with_spawn_radius(mut self, radius: f32) -> Self {
        self.spawn_radius = radius;
        self
    }

    /// Builder: set RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Smallest extent either bound axis may shrink to
    pub fn min_bound_extent(&self) -> f32 {
        self.params.react_radius * 2.0
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<(), SimError> {
        let p = &self.params;
        if !(p.particle_speed > 0.0) {
            return Err(invalid("particle_speed", p.particle_speed));
        }
        if !(p.react_radius > 0.0) {
            return Err(invalid("react_radius", p.react_radius));
        }
        if !p.alpha.is_finite() {
            return Err(invalid("alpha", p.alpha));
        }
        if !p.beta.is_finite() {
            return Err(invalid("beta", p.beta));
        }
        if self.dispatch.thread_number == 0 {
            return Err(SimError::InvalidConfig(
                "thread_number must be at least 1".to_string(),
            ));
        }
        if self.dispatch.threads_per_block == 0 {
            return Err(SimError::InvalidConfig(
                "threads_per_block must be at least 1".to_string(),
            ));
        }
        if !(self.bound.width.is_finite() && self.bound.height.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "bound {}x{} must be finite",
                self.bound.width, self.bound.height
            )));
        }
        let min = self.min_bound_extent();
        if !(self.bound.width >= min && self.bound.height >= min) {
            return Err(SimError::InvalidConfig(format!(
                "bound {}x{} is smaller than twice the reaction radius ({})",
                self.bound.width, self.bound.height, min
            )));
        }
        if self.max_particles == 0 {
            return Err(SimError::InvalidConfig(
                "max_particles must be at least 1".to_string(),
            ));
        }
        if !(self.bound_step.x >= 0.0 && self.bound_step.y >= 0.0) {
            return Err(SimError::InvalidConfig(
                "bound_step must not be negative".to_string(),
            ));
        }
        if !(self.spawn_radius >= 0.0) {
            return Err(invalid("spawn_radius", self.spawn_radius));
        }
        Ok(())
    }
}

fn invalid(name: &str, value: f32) -> SimError {
    SimError::InvalidConfig(format!("{} out of range: {}", name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_threads() {
        let config = SimulationConfig::default().with_dispatch(0, 64);
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        let config = SimulationConfig::default().with_dispatch(2, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_params() {
        let mut params = ReactionParams::default();
        params.react_radius = 0.0;
        assert!(SimulationConfig::default().with_params(params).validate().is_err());

        let mut params = ReactionParams::default();
        params.particle_speed = f32::NAN;
        assert!(SimulationConfig::default().with_params(params).validate().is_err());
    }

    #[test]
    fn test_rejects_bound_smaller_than_neighbourhood() {
        // Default radius is 5, so each axis needs at least 10
        let config = SimulationConfig::default().with_bound(Bound2::new(9.0, 100.0));
        assert!(config.validate().is_err());
        let config = SimulationConfig::default().with_bound(Bound2::new(10.0, 10.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_angles_in_radians() {
        let params = ReactionParams::default();
        assert!((params.alpha_radians() - std::f32::consts::PI).abs() < 1e-6);
        assert!((params.close_radius() - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_non_finite_bound() {
        let config = SimulationConfig::default().with_bound(Bound2::new(f32::INFINITY, 100.0));
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_accepts_very_large_bound() {
        let config = SimulationConfig::default().with_bound(Bound2::new(1.0e6, 1.0e6));
        assert!(config.validate().is_ok());
    }
}
