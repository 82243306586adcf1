//! Simulation kernel: particle integration against a cubic chamber, the
//! per-frame clock that drives it, the flight camera state and the 2D logo
//! animation.
//!
//! # Invariants
//! - Every step is a pure function of `(state, dt)`; the host owns the clock
//!   and key state.
//! - A settled particle never moves again.
//! - Collision response never increases a particle's speed.

pub mod clock;
pub mod flight;
pub mod integrator;
pub mod logo;
pub mod particle;
pub mod simulation;

pub use clock::FrameClock;
pub use flight::{FlightControls, FlightState};
pub use integrator::{
    CollisionReport, Impact, PhysicsParams, StepOutcome, Wall, detect_impact, reflect, step,
};
pub use logo::{BouncingBall, LogoMode, LogoState};
pub use particle::Particle;
pub use simulation::{
    FrameReport, Simulation, SimulationConfig, SimulationError, SimulationSummary,
};
