//! Particle manager: owns the population and steps it
//!
//! Each step reads a frozen snapshot of the population and writes the next
//! state into a back buffer, so every particle sees the same tick. The back
//! buffer is filled in `threads_per_block`-sized chunks on a pool of
//! `thread_number` workers.

use std::f32::consts::{PI, TAU};

use primordia_math::{Bound2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::{ReactionParams, SimulationConfig};
use crate::error::SimError;
use crate::grid::SpatialGrid;
use crate::particle::{normalize_heading, Particle};
use crate::ParticleSimulation;

/// How the simulation treats the bound edges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimulationMode {
    /// Opposite edges are joined; neighbourhoods reach across them
    Toroidal,
    /// Edges are solid walls that particles bounce off
    Walled,
}

impl SimulationMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            SimulationMode::Toroidal => SimulationMode::Walled,
            SimulationMode::Walled => SimulationMode::Toroidal,
        }
    }

    pub fn wraps(self) -> bool {
        self == SimulationMode::Toroidal
    }

    /// Short label for window titles and logs
    pub fn label(self) -> &'static str {
        match self {
            SimulationMode::Toroidal => "toroidal",
            SimulationMode::Walled => "walled",
        }
    }
}

/// Owns the particle population, the spatial grid and the worker pool
pub struct ParticleManager {
    config: SimulationConfig,
    bound: Bound2,
    mode: SimulationMode,
    particles: Vec<Particle>,
    back: Vec<Particle>,
    grid: SpatialGrid,
    pool: rayon::ThreadPool,
    rng: StdRng,
    tick: u64,
}

impl ParticleManager {
    /// Create an empty simulation
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.dispatch.thread_number)
            .thread_name(|i| format!("primordia-step-{}", i))
            .build()
            .map_err(|e| SimError::ThreadPool(e.to_string()))?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let bound = config.bound;
        let grid = SpatialGrid::new(bound, config.params.react_radius);

        log::info!(
            "Particle manager: bound {}x{}, {} threads, {} particles per block",
            bound.width,
            bound.height,
            config.dispatch.thread_number,
            config.dispatch.threads_per_block
        );

        Ok(Self {
            config,
            bound,
            mode: SimulationMode::Toroidal,
            particles: Vec::new(),
            back: Vec::new(),
            grid,
            pool,
            rng,
            tick: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of steps taken so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    pub fn simulation_bound(&self) -> Bound2 {
        self.bound
    }

    /// Remove every particle
    pub fn clear(&mut self) {
        self.particles.clear();
        self.back.clear();
    }

    /// Insert one particle, folded into the bound. Returns false at capacity.
    pub fn add_particle(&mut self, position: Vec2, heading: f32) -> bool {
        if self.particles.len() >= self.config.max_particles {
            return false;
        }
        let position = self.fold(position);
        self.particles.push(Particle::new(position, heading));
        true
    }

    /// Scatter up to `count` particles in a disc around `point`
    ///
    /// Returns how many were actually added; the population never exceeds
    /// `max_particles`.
    pub fn spawn_cells(&mut self, point: Vec2, count: usize) -> usize {
        let available = self.config.max_particles.saturating_sub(self.particles.len());
        let n = count.min(available);
        if n < count {
            log::warn!(
                "Particle capacity {} reached, spawning {} of {}",
                self.config.max_particles,
                n,
                count
            );
        }

        let radius = self.config.spawn_radius;
        self.particles.reserve(n);
        for _ in 0..n {
            // sqrt keeps the disc uniformly filled
            let r = radius * self.rng.gen::<f32>().sqrt();
            let offset = Vec2::from_angle(self.rng.gen_range(0.0..TAU)) * r;
            let heading = self.rng.gen_range(0.0..TAU);
            let position = self.fold(point + offset);
            self.particles.push(Particle::new(position, heading));
        }

        log::debug!(
            "Spawned {} particles at ({:.1}, {:.1}), population {}",
            n,
            point.x,
            point.y,
            self.particles.len()
        );
        n
    }

    /// Grow the bound by one step
    pub fn increase_simulation_bound(&mut self) -> Bound2 {
        let bound = self.bound.grown(self.config.bound_step);
        self.set_bound(bound);
        self.bound
    }

    /// Shrink the bound by one step, never below twice the reaction radius
    pub fn reduce_simulation_bound(&mut self) -> Bound2 {
        let bound = self
            .bound
            .shrunk(self.config.bound_step, self.config.min_bound_extent());
        self.set_bound(bound);
        self.bound
    }

    fn set_bound(&mut self, bound: Bound2) {
        self.bound = bound;
        self.grid.resize(bound, self.config.params.react_radius);
        for i in 0..self.particles.len() {
            self.particles[i].position = self.fold(self.particles[i].position);
        }
        log::info!("Simulation bound: {}x{}", bound.width, bound.height);
    }

    /// Switch between toroidal and walled edges
    pub fn change_mode(&mut self) -> SimulationMode {
        self.mode = self.mode.toggled();
        log::info!("Simulation mode: {}", self.mode.label());
        self.mode
    }

    /// Advance every particle by one tick
    pub fn update(&mut self) {
        self.tick += 1;
        if self.particles.is_empty() {
            return;
        }

        self.grid.rebuild(&self.particles);

        let step = StepContext {
            particles: &self.particles,
            grid: &self.grid,
            bound: self.bound,
            mode: self.mode,
            params: StepParams::from(&self.config.params),
        };

        let chunk = self.config.dispatch.threads_per_block;
        let back = &mut self.back;
        back.clear();
        back.resize(step.particles.len(), Particle::new(Vec2::ZERO, 0.0));

        self.pool.install(|| {
            back.par_chunks_mut(chunk)
                .enumerate()
                .for_each(|(block, out)| {
                    let base = block * chunk;
                    for (offset, slot) in out.iter_mut().enumerate() {
                        *slot = step.advance(base + offset);
                    }
                });
        });

        std::mem::swap(&mut self.particles, &mut self.back);
    }

    fn fold(&self, p: Vec2) -> Vec2 {
        match self.mode {
            SimulationMode::Toroidal => self.bound.wrap(p),
            SimulationMode::Walled => self.bound.clamp(p),
        }
    }
}

/// Step parameters pre-converted for the inner loop
#[derive(Clone, Copy)]
struct StepParams {
    speed: f32,
    alpha: f32,
    beta: f32,
    radius_sq: f32,
    close_sq: f32,
}

impl From<&ReactionParams> for StepParams {
    fn from(p: &ReactionParams) -> Self {
        Self {
            speed: p.particle_speed,
            alpha: p.alpha_radians(),
            beta: p.beta_radians(),
            radius_sq: p.react_radius * p.react_radius,
            close_sq: p.close_radius() * p.close_radius(),
        }
    }
}

/// Read-only view of one tick, shared by every worker
struct StepContext<'a> {
    particles: &'a [Particle],
    grid: &'a SpatialGrid,
    bound: Bound2,
    mode: SimulationMode,
    params: StepParams,
}

impl StepContext<'_> {
    /// Next state of particle `i`
    fn advance(&self, i: usize) -> Particle {
        let me = self.particles[i];
        let dir = me.direction();
        let wrap = self.mode.wraps();

        let mut left = 0u32;
        let mut right = 0u32;
        let mut close = 0u32;

        self.grid.for_each_candidate(me.position, wrap, |j| {
            if j == i {
                return;
            }
            let mut d = self.particles[j].position - me.position;
            if wrap {
                d = self.bound.minimum_image(d);
            }
            let dist_sq = d.length_squared();
            if dist_sq > self.params.radius_sq {
                return;
            }
            if dist_sq < self.params.close_sq {
                close += 1;
            }
            if dir.cross(d) > 0.0 {
                left += 1;
            } else {
                right += 1;
            }
        });

        let n = left + right;
        let side = match right.cmp(&left) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Less => -1.0,
            std::cmp::Ordering::Equal => 0.0,
        };
        let heading = me.heading + self.params.alpha + self.params.beta * n as f32 * side;
        let position = me.position + Vec2::from_angle(heading) * self.params.speed;

        let (position, heading) = match self.mode {
            SimulationMode::Toroidal => (self.bound.wrap(position), heading),
            SimulationMode::Walled => reflect(self.bound, position, heading),
        };

        Particle {
            position,
            heading: normalize_heading(heading),
            neighbors: n,
            close_neighbors: close,
        }
    }
}

/// Mirror a particle that crossed a wall back inside
fn reflect(bound: Bound2, mut p: Vec2, mut heading: f32) -> (Vec2, f32) {
    if p.x < 0.0 {
        p.x = -p.x;
        heading = PI - heading;
    } else if p.x > bound.width {
        p.x = 2.0 * bound.width - p.x;
        heading = PI - heading;
    }
    if p.y < 0.0 {
        p.y = -p.y;
        heading = -heading;
    } else if p.y > bound.height {
        p.y = 2.0 * bound.height - p.y;
        heading = -heading;
    }
    (bound.clamp(p), heading)
}

impl ParticleSimulation for ParticleManager {
    fn update(&mut self) {
        ParticleManager::update(self)
    }

    fn particles(&self) -> &[Particle] {
        ParticleManager::particles(self)
    }

    fn spawn_cells(&mut self, point: Vec2, count: usize) -> usize {
        ParticleManager::spawn_cells(self, point, count)
    }

    fn increase_simulation_bound(&mut self) -> Bound2 {
        ParticleManager::increase_simulation_bound(self)
    }

    fn reduce_simulation_bound(&mut self) -> Bound2 {
        ParticleManager::reduce_simulation_bound(self)
    }

    fn simulation_bound(&self) -> Bound2 {
        ParticleManager::simulation_bound(self)
    }

    fn change_mode(&mut self) -> SimulationMode {
        ParticleManager::change_mode(self)
    }

    fn mode(&self) -> SimulationMode {
        ParticleManager::mode(self)
    }
}
