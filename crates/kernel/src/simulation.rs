use std::fmt;

use demoscape_common::{Color, ParticleId};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::clock::FrameClock;
use crate::integrator::{PhysicsParams, StepOutcome, step};
use crate::particle::{DEFAULT_DENSITY, Particle};

/// Errors from simulation setup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid simulation parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("particle radius {radius} does not fit a chamber of half extent {half_extent}")]
    ParticleTooLarge { radius: f32, half_extent: f32 },
}

/// Chamber, spawning and timing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Walls sit at `±chamber_half_extent` on every axis.
    pub chamber_half_extent: f32,
    /// Speed of freshly spawned particles.
    pub initial_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub density: f32,
    /// Multiplier applied to wall-clock frame time before stepping.
    pub time_scale: f32,
    pub physics: PhysicsParams,
    /// Seed for spawn positions, velocities, colors and radii.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            chamber_half_extent: 2.5,
            initial_speed: 3.0,
            radius_min: 0.1,
            radius_max: 0.5,
            density: DEFAULT_DENSITY,
            time_scale: 0.5,
            physics: PhysicsParams::default(),
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let positive = [
            ("chamber_half_extent", self.chamber_half_extent),
            ("radius_min", self.radius_min),
            ("radius_max", self.radius_max),
            ("density", self.density),
            ("time_scale", self.time_scale),
            ("drag", self.physics.drag),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::InvalidParameter { name, value });
            }
        }
        let non_negative = [
            ("initial_speed", self.initial_speed),
            ("restitution", self.physics.restitution),
            ("settle_speed", self.physics.settle_speed),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidParameter { name, value });
            }
        }
        if self.physics.restitution > 1.0 {
            return Err(SimulationError::InvalidParameter {
                name: "restitution",
                value: self.physics.restitution,
            });
        }
        if self.radius_min > self.radius_max {
            return Err(SimulationError::InvalidParameter {
                name: "radius_min",
                value: self.radius_min,
            });
        }
        if self.radius_max >= self.chamber_half_extent {
            return Err(SimulationError::ParticleTooLarge {
                radius: self.radius_max,
                half_extent: self.chamber_half_extent,
            });
        }
        if !self.physics.gravity.is_finite() {
            return Err(SimulationError::InvalidParameter {
                name: "gravity",
                value: self.physics.gravity.length(),
            });
        }
        Ok(())
    }
}

/// What happened during one [`Simulation::advance`] or [`Simulation::step_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame: u64,
    /// Scaled step length actually integrated.
    pub dt: f32,
    pub stepped: usize,
    pub collisions: usize,
    pub newly_settled: usize,
}

/// Read-only snapshot of simulation counters for logs and tooling.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub frame: u64,
    pub particles: usize,
    pub settled: usize,
    pub chamber_half_extent: f32,
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Simulation: frame={} particles={} settled={} chamber=±{:.2}",
            self.frame, self.particles, self.settled, self.chamber_half_extent
        )
    }
}

/// Particle chamber state driven one frame at a time by the host.
///
/// Replaces the module-level particle list and previous-time global with an
/// explicit value the host owns.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    particles: Vec<Particle>,
    clock: FrameClock,
    rng: ChaCha8Rng,
    frame: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            particles: Vec::new(),
            clock: FrameClock::new(),
            rng,
            frame: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Spawn a particle with random radius, color, position inside the chamber
    /// and a random direction at `initial_speed`.
    pub fn spawn_particle(&mut self) -> ParticleId {
        let c = &self.config;
        let radius = c.radius_min + self.rng.random::<f32>() * (c.radius_max - c.radius_min);
        let reach = c.chamber_half_extent - radius;
        let position = Vec3::new(
            self.rng.random_range(-reach..=reach),
            self.rng.random_range(-reach..=reach),
            self.rng.random_range(-reach..=reach),
        );
        let direction = Vec3::new(self.rng.random(), self.rng.random(), self.rng.random());
        let velocity = direction.try_normalize().unwrap_or(Vec3::Y) * c.initial_speed;
        let color = Color::new(self.rng.random(), self.rng.random(), self.rng.random());

        let particle = Particle::with_density(position, velocity, radius, color, c.density);
        let id = particle.id();
        tracing::debug!(
            id = %id.short(),
            ?position,
            radius,
            count = self.particles.len() + 1,
            "spawned particle"
        );
        self.particles.push(particle);
        id
    }

    /// Add a particle built by the caller.
    ///
    /// Rejects particles that cannot fit between opposite walls.
    pub fn insert(&mut self, particle: Particle) -> Result<ParticleId, SimulationError> {
        let radius = particle.radius();
        let half_extent = self.config.chamber_half_extent;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimulationError::InvalidParameter {
                name: "radius",
                value: radius,
            });
        }
        if radius >= half_extent {
            return Err(SimulationError::ParticleTooLarge {
                radius,
                half_extent,
            });
        }
        let id = particle.id();
        self.particles.push(particle);
        Ok(id)
    }

    pub fn clear_particles(&mut self) {
        tracing::debug!(removed = self.particles.len(), "clearing particles");
        self.particles.clear();
    }

    /// Advance to the host timestamp `current_time_ms`.
    ///
    /// The elapsed wall time since the previous frame is scaled by
    /// `time_scale` and every particle takes exactly one step of that length.
    pub fn advance(&mut self, current_time_ms: f64) -> FrameReport {
        let dt = self.clock.tick(current_time_ms) * self.config.time_scale;
        self.step_all(dt)
    }

    /// Step every particle by `dt` seconds, bypassing the clock.
    pub fn step_all(&mut self, dt: f32) -> FrameReport {
        let span = tracing::trace_span!("simulation_step", frame = self.frame, dt);
        let _guard = span.enter();
        self.frame += 1;

        let mut report = FrameReport {
            frame: self.frame,
            dt,
            ..FrameReport::default()
        };
        let bound = self.config.chamber_half_extent;
        for particle in &mut self.particles {
            match step(particle, dt, bound, &self.config.physics) {
                StepOutcome::Frozen | StepOutcome::Skipped => {}
                StepOutcome::Free => report.stepped += 1,
                StepOutcome::Collided(r) => {
                    report.stepped += 1;
                    report.collisions += 1;
                    if r.settled {
                        report.newly_settled += 1;
                    }
                }
            }
        }

        tracing::trace!(
            stepped = report.stepped,
            collisions = report.collisions,
            settled = report.newly_settled,
            "frame complete"
        );
        report
    }

    pub fn settled_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_settled()).count()
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            frame: self.frame,
            particles: self.particles.len(),
            settled: self.settled_count(),
            chamber_half_extent: self.config.chamber_half_extent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sim(seed: u64) -> Simulation {
        Simulation::new(SimulationConfig {
            seed,
            ..SimulationConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn starts_empty() {
        let s = sim(0);
        assert!(s.is_empty());
        assert_eq!(s.frame(), 0);
    }

    #[test]
    fn spawned_particles_respect_config() {
        let mut s = sim(42);
        for _ in 0..100 {
            s.spawn_particle();
        }
        assert_eq!(s.len(), 100);
        let c = s.config().clone();
        for p in s.particles() {
            assert!(p.radius() >= c.radius_min && p.radius() <= c.radius_max);
            let reach = c.chamber_half_extent - p.radius();
            assert!(p.position().abs().max_element() <= reach + 1e-5);
            assert!((p.speed() - c.initial_speed).abs() < 1e-4);
            let v = p.velocity();
            assert!(v.x >= 0.0 && v.y >= 0.0 && v.z >= 0.0);
            let expected_mass = c.density * 4.0 / 3.0 * PI * p.radius().powi(3);
            assert!((p.mass() - expected_mass).abs() < 1e-5);
            for channel in p.color().to_array() {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn same_seed_spawns_same_particles() {
        let mut a = sim(7);
        let mut b = sim(7);
        a.spawn_particle();
        b.spawn_particle();
        assert_eq!(a.particles()[0].position(), b.particles()[0].position());
        assert_eq!(a.particles()[0].velocity(), b.particles()[0].velocity());
    }

    #[test]
    fn clear_removes_everything() {
        let mut s = sim(1);
        s.spawn_particle();
        s.spawn_particle();
        s.clear_particles();
        assert!(s.is_empty());
        assert_eq!(s.settled_count(), 0);
    }

    #[test]
    fn first_frame_does_not_move_particles() {
        let mut s = sim(3);
        let id = s.spawn_particle();
        let before = s.particle(id).unwrap().clone();
        let report = s.advance(12_345.0);
        assert_eq!(report.dt, 0.0);
        assert_eq!(report.stepped, 0);
        assert_eq!(s.particle(id).unwrap(), &before);
    }

    #[test]
    fn advance_scales_frame_time() {
        let mut s = sim(3);
        s.spawn_particle();
        s.advance(1000.0);
        let report = s.advance(1100.0);
        assert!((report.dt - 0.05).abs() < 1e-6);
        assert_eq!(report.stepped, 1);
        assert_eq!(report.frame, 2);
    }

    #[test]
    fn particles_stay_in_chamber_over_time() {
        let mut s = sim(9);
        for _ in 0..20 {
            s.spawn_particle();
        }
        let bound = s.config().chamber_half_extent;
        let mut t = 0.0;
        for _ in 0..600 {
            t += 1000.0 / 60.0;
            s.advance(t);
        }
        for p in s.particles() {
            // A corner hit resolves one wall per step, so allow one frame of travel.
            let reach = bound - p.radius() + 0.05;
            assert!(p.position().abs().max_element() <= reach);
        }
    }

    #[test]
    fn settling_is_reported_once() {
        let config = SimulationConfig {
            physics: PhysicsParams::ballistic(),
            ..SimulationConfig::default()
        };
        let mut s = Simulation::new(config).unwrap();
        s.insert(Particle::new(
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::new(0.0, -0.005, 0.0),
            0.5,
            Color::WHITE,
        ))
        .unwrap();
        let first = s.step_all(1.0);
        assert_eq!(first.newly_settled, 1);
        let second = s.step_all(1.0);
        assert_eq!(second.newly_settled, 0);
        assert_eq!(second.stepped, 0);
        assert_eq!(s.summary().settled, 1);
    }

    #[test]
    fn insert_rejects_particles_wider_than_chamber() {
        let mut s = sim(0);
        let huge = Particle::new(Vec3::ZERO, Vec3::ZERO, 2.5, Color::WHITE);
        assert_eq!(
            s.insert(huge),
            Err(SimulationError::ParticleTooLarge {
                radius: 2.5,
                half_extent: 2.5,
            })
        );
        let flat = Particle::new(Vec3::ZERO, Vec3::ZERO, 0.0, Color::WHITE);
        assert!(matches!(
            s.insert(flat),
            Err(SimulationError::InvalidParameter { name: "radius", .. })
        ));
        assert!(s.is_empty());

        let fits = Particle::new(Vec3::ZERO, Vec3::X, 0.5, Color::WHITE);
        let id = s.insert(fits).unwrap();
        assert!(s.particle(id).is_some());
    }

    #[test]
    fn summary_display() {
        let mut s = sim(0);
        s.spawn_particle();
        let text = s.summary().to_string();
        assert!(text.contains("particles=1"));
        assert!(text.contains("settled=0"));
    }

    #[test]
    fn rejects_invalid_configs() {
        let too_big = SimulationConfig {
            radius_max: 3.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Simulation::new(too_big),
            Err(SimulationError::ParticleTooLarge { .. })
        ));

        let bad_time = SimulationConfig {
            time_scale: 0.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            bad_time.validate(),
            Err(SimulationError::InvalidParameter {
                name: "time_scale",
                value: 0.0,
            })
        );

        let bouncy = SimulationConfig {
            physics: PhysicsParams {
                restitution: 1.5,
                ..PhysicsParams::default()
            },
            ..SimulationConfig::default()
        };
        assert!(bouncy.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let json = r#"{ "chamber_half_extent": 4.0, "physics": { "drag": 0.8 } }"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.chamber_half_extent, 4.0);
        assert_eq!(config.physics.drag, 0.8);
        assert_eq!(config.physics.restitution, 0.9);
        assert_eq!(config.time_scale, 0.5);
    }
}
