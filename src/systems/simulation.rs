//! Simulation driving system
//!
//! Owns the particle simulation on behalf of the shell:
//! - Pause state and step scheduling
//! - Translating viewer actions into simulation commands
//! - Tracking the bound the background rectangle is drawn at

use primordia_math::{Bound2, Vec2};
use primordia_sim::ParticleSimulation;
use crate::input::InputAction;

/// What the shell should do after an action was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Close the window and leave the event loop
    Exit,
    /// Simulation state changed; refresh anything that displays it
    Changed,
    /// Nothing happened
    Ignored,
}

/// Drives a particle simulation from the event loop
pub struct SimulationSystem<S: ParticleSimulation> {
    simulation: S,
    paused: bool,
    /// Set by the frame limiter; consumed by the next `tick`
    step_pending: bool,
    spawn_count: usize,
    /// Size of the drawn background, kept in sync with the simulation bound
    background: Bound2,
}

impl<S: ParticleSimulation> SimulationSystem<S> {
    /// Wrap a simulation; `spawn_count` particles are added per spawn action
    pub fn new(simulation: S, spawn_count: usize) -> Self {
        let background = simulation.simulation_bound();
        Self {
            simulation,
            paused: false,
            step_pending: false,
            spawn_count,
            background,
        }
    }

    /// Builder: start paused or running
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Bound the background rectangle should be drawn at
    pub fn background(&self) -> Bound2 {
        self.background
    }

    /// Allow the next `tick` to step; repeated calls before it still allow one step
    pub fn schedule_step(&mut self) {
        self.step_pending = true;
    }

    /// Advance one tick if a step was scheduled and the simulation is not paused
    ///
    /// Returns whether the simulation stepped. Redraws that were not scheduled
    /// (exposure, resize, surface recovery) only repaint.
    pub fn tick(&mut self) -> bool {
        if !std::mem::take(&mut self.step_pending) || self.paused {
            return false;
        }
        self.simulation.update();
        true
    }

    /// Apply a viewer action
    ///
    /// `cursor_world` is the world point under the cursor, needed by `Spawn`.
    pub fn apply(&mut self, action: InputAction, cursor_world: Option<Vec2>) -> ActionOutcome {
        match action {
            InputAction::Exit => ActionOutcome::Exit,
            InputAction::TogglePause => {
                self.paused = !self.paused;
                log::info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
                ActionOutcome::Changed
            }
            InputAction::IncreaseBound => {
                self.background = self.simulation.increase_simulation_bound();
                ActionOutcome::Changed
            }
            InputAction::ReduceBound => {
                self.background = self.simulation.reduce_simulation_bound();
                ActionOutcome::Changed
            }
            InputAction::ChangeMode => {
                self.simulation.change_mode();
                ActionOutcome::Changed
            }
            InputAction::Spawn => match cursor_world {
                Some(point) => {
                    let added = self.simulation.spawn_cells(point, self.spawn_count);
                    log::debug!(
                        "Spawned {} particles at ({:.1}, {:.1})",
                        added,
                        point.x,
                        point.y
                    );
                    if added > 0 { ActionOutcome::Changed } else { ActionOutcome::Ignored }
                }
                None => {
                    log::debug!("Spawn ignored: cursor position unknown");
                    ActionOutcome::Ignored
                }
            },
        }
    }
}
