use bytemuck::{Pod, Zeroable};
use demoscape_kernel::{Particle, Simulation};
use serde::{Deserialize, Serialize};

/// Per-particle draw data.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub radius: f32,
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle) -> Self {
        Self {
            position: p.position().to_array(),
            color: p.color().to_array(),
            radius: p.radius(),
        }
    }
}

/// Instances for every particle, in simulation order.
pub fn particle_instances(sim: &Simulation) -> Vec<ParticleInstance> {
    sim.particles()
        .iter()
        .map(ParticleInstance::from_particle)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use demoscape_common::Color;
    use demoscape_kernel::SimulationConfig;
    use glam::Vec3;

    #[test]
    fn layout_is_seven_floats() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 28);
        let instances = [ParticleInstance::zeroed(); 2];
        let floats: &[f32] = bytemuck::cast_slice(&instances);
        assert_eq!(floats.len(), 14);
    }

    #[test]
    fn copies_particle_fields() {
        let p = Particle::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ZERO,
            0.25,
            Color::new(0.1, 0.2, 0.3),
        );
        let i = ParticleInstance::from_particle(&p);
        assert_eq!(i.position, [1.0, 2.0, 3.0]);
        assert_eq!(i.color, [0.1, 0.2, 0.3]);
        assert_eq!(i.radius, 0.25);
    }

    #[test]
    fn one_instance_per_particle() {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        for _ in 0..5 {
            sim.spawn_particle();
        }
        let instances = particle_instances(&sim);
        assert_eq!(instances.len(), 5);
        let fourth = sim.particles()[3].position();
        assert_eq!(instances[3].position, fourth.to_array());
    }
}
