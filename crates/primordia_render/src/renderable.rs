//! Conversion from simulation state to GPU instances

use primordia_math::Bound2;
use primordia_sim::Particle;

use crate::pipeline::ParticleInstance;

/// Instance list for one frame: background first, then particles
#[derive(Clone, Debug, Default)]
pub struct RenderableParticles {
    pub instances: Vec<ParticleInstance>,
}

impl RenderableParticles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh instance list
    pub fn build(
        bound: Bound2,
        background_color: [f32; 4],
        particles: &[Particle],
        particle_radius: f32,
    ) -> Self {
        let mut renderable = Self::new();
        renderable.rebuild(bound, background_color, particles, particle_radius);
        renderable
    }

    /// Refill the instance list, reusing the allocation
    ///
    /// The background rectangle sits at the origin and spans the bound, so it
    /// always tracks the current simulation bound.
    pub fn rebuild(
        &mut self,
        bound: Bound2,
        background_color: [f32; 4],
        particles: &[Particle],
        particle_radius: f32,
    ) {
        self.instances.clear();
        self.instances.reserve(particles.len() + 1);
        self.instances.push(ParticleInstance::rect(
            [0.0, 0.0],
            [bound.width, bound.height],
            background_color,
        ));
        self.instances.extend(particles.iter().map(|p| {
            ParticleInstance::disc(p.position.to_array(), particle_radius, p.class().color())
        }));
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Number of particle instances, excluding the background
    pub fn particle_count(&self) -> usize {
        self.instances.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{SHAPE_DISC, SHAPE_RECT};
    use primordia_math::Vec2;
    use primordia_sim::ParticleClass;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    #[test]
    fn test_background_only() {
        let r = RenderableParticles::build(Bound2::new(300.0, 200.0), WHITE, &[], 1.0);
        assert_eq!(r.instance_count(), 1);
        assert_eq!(r.particle_count(), 0);
        let bg = r.instances[0];
        assert_eq!(bg.shape, SHAPE_RECT);
        assert_eq!(bg.position, [0.0, 0.0]);
        assert_eq!(bg.size, [300.0, 200.0]);
        assert_eq!(bg.color, WHITE);
    }

    #[test]
    fn test_particles_colored_by_class() {
        let mut crowded = Particle::new(Vec2::new(5.0, 6.0), 0.0);
        crowded.neighbors = 40;
        let particles = vec![Particle::new(Vec2::new(1.0, 2.0), 0.0), crowded];

        let r = RenderableParticles::build(Bound2::new(10.0, 10.0), WHITE, &particles, 0.5);
        assert_eq!(r.particle_count(), 2);

        let free = r.instances[1];
        assert_eq!(free.shape, SHAPE_DISC);
        assert_eq!(free.position, [1.0, 2.0]);
        assert_eq!(free.size, [1.0, 1.0]);
        assert_eq!(free.color, ParticleClass::Free.color());
        assert_eq!(r.instances[2].color, ParticleClass::Dense.color());
    }

    #[test]
    fn test_rebuild_tracks_new_bound() {
        let mut r = RenderableParticles::build(Bound2::new(10.0, 10.0), WHITE, &[], 0.5);
        r.rebuild(Bound2::new(35.0, 20.0), WHITE, &[], 0.5);
        assert_eq!(r.instance_count(), 1);
        assert_eq!(r.instances[0].size, [35.0, 20.0]);
    }
}
