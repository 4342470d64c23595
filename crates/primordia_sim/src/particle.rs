//! Particle state and classification

use primordia_math::Vec2;

/// A single self-propelled particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position inside the simulation bound
    pub position: Vec2,
    /// Heading in radians, kept in `[0, 2π)`
    pub heading: f32,
    /// Neighbours within the reaction radius at the last step
    pub neighbors: u32,
    /// Neighbours within the close radius at the last step
    pub close_neighbors: u32,
}

impl Particle {
    /// Create a particle that has not been stepped yet
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading: normalize_heading(heading),
            neighbors: 0,
            close_neighbors: 0,
        }
    }

    /// Unit vector along the heading
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    /// Classification from the last step's neighbourhood
    #[inline]
    pub fn class(&self) -> ParticleClass {
        ParticleClass::classify(self.neighbors, self.close_neighbors)
    }
}

/// Fold an angle into `[0, 2π)`
pub(crate) fn normalize_heading(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // Tiny negative angles round up to exactly 2π
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Structural role a particle plays, derived from local density
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleClass {
    /// Sparse surroundings
    Free,
    /// 13 to 15 neighbours
    Spore,
    /// 16 to 35 neighbours
    Membrane,
    /// More than 35 neighbours
    Dense,
    /// More than 15 close neighbours
    Nucleus,
}

impl ParticleClass {
    /// Classify by neighbour and close-neighbour counts
    pub fn classify(neighbors: u32, close_neighbors: u32) -> Self {
        if close_neighbors > 15 {
            ParticleClass::Nucleus
        } else if neighbors > 35 {
            ParticleClass::Dense
        } else if neighbors > 15 {
            ParticleClass::Membrane
        } else if neighbors >= 13 {
            ParticleClass::Spore
        } else {
            ParticleClass::Free
        }
    }

    /// RGBA display color
    pub fn color(self) -> [f32; 4] {
        match self {
            ParticleClass::Free => [0.1, 0.75, 0.2, 1.0],
            ParticleClass::Spore => [0.55, 0.35, 0.15, 1.0],
            ParticleClass::Membrane => [0.15, 0.3, 0.95, 1.0],
            ParticleClass::Dense => [1.0, 0.85, 0.1, 1.0],
            ParticleClass::Nucleus => [0.9, 0.15, 0.9, 1.0],
        }
    }
}
