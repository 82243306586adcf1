use std::fmt;
use std::str::FromStr;

use demoscape_kernel::flight::{PITCH_STEP_DEG, ROLL_STEP_DEG, SPEED_STEP};
use demoscape_kernel::{FlightControls, FlightState, Simulation};
use serde::{Deserialize, Serialize};

/// Errors from turning host text into actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

/// A high-level action a host can produce.
///
/// Simulation and flight state consume actions, never raw input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Add one random particle to the chamber.
    SpawnParticle,
    /// Remove every particle.
    ClearParticles,
    /// Put the flight camera back at its start.
    ResetPlane,
    PitchUp,
    PitchDown,
    RollLeft,
    RollRight,
    SpeedUp,
    SlowDown,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::SpawnParticle,
        Action::ClearParticles,
        Action::ResetPlane,
        Action::PitchUp,
        Action::PitchDown,
        Action::RollLeft,
        Action::RollRight,
        Action::SpeedUp,
        Action::SlowDown,
    ];

    /// True for actions that act once when triggered rather than while held.
    pub fn is_one_shot(self) -> bool {
        matches!(
            self,
            Action::SpawnParticle | Action::ClearParticles | Action::ResetPlane
        )
    }

    /// Run a one-shot action. Held controls are ignored here.
    ///
    /// Returns `true` if the action changed any state.
    pub fn apply(self, sim: &mut Simulation, flight: &mut FlightState) -> bool {
        tracing::trace!(action = %self, "applying action");
        match self {
            Action::SpawnParticle => {
                sim.spawn_particle();
                true
            }
            Action::ClearParticles => {
                sim.clear_particles();
                true
            }
            Action::ResetPlane => {
                flight.reset();
                true
            }
            _ => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::SpawnParticle => "spawn",
            Action::ClearParticles => "clear",
            Action::ResetPlane => "reset",
            Action::PitchUp => "pitch-up",
            Action::PitchDown => "pitch-down",
            Action::RollLeft => "roll-left",
            Action::RollRight => "roll-right",
            Action::SpeedUp => "speed-up",
            Action::SlowDown => "slow-down",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Action::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| InputError::UnknownAction(s.to_string()))
    }
}

/// Fold the actions held this frame into one frame of flight controls.
///
/// Opposing controls cancel; one-shot actions contribute nothing.
pub fn controls_from_held(held: &[Action]) -> FlightControls {
    let mut controls = FlightControls::default();
    for action in held {
        match action {
            Action::PitchUp => controls.pitch_deg += PITCH_STEP_DEG,
            Action::PitchDown => controls.pitch_deg -= PITCH_STEP_DEG,
            // Right rolls clockwise, which is a negative angle about Z.
            Action::RollLeft => controls.roll_deg += ROLL_STEP_DEG,
            Action::RollRight => controls.roll_deg -= ROLL_STEP_DEG,
            Action::SpeedUp => controls.speed_delta += SPEED_STEP,
            Action::SlowDown => controls.speed_delta -= SPEED_STEP,
            Action::SpawnParticle | Action::ClearParticles | Action::ResetPlane => {}
        }
    }
    controls
}
