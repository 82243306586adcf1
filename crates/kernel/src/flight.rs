use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, -6.0, 5.0);
/// Forward direction before any rotation: climbing along +Y, angled down.
pub const INITIAL_DIRECTION: Vec3 = Vec3::new(0.0, 6.0, -3.0);
pub const INITIAL_SPEED: f32 = 0.01;
/// Speed change per frame a throttle control is held.
pub const SPEED_STEP: f32 = 0.001;
/// Pitch change in degrees per frame.
pub const PITCH_STEP_DEG: f32 = 0.2;
/// Roll change in degrees per frame.
pub const ROLL_STEP_DEG: f32 = 5.0 * PITCH_STEP_DEG;

/// Per-frame control input, already folded from whatever the host holds down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightControls {
    pub pitch_deg: f32,
    pub roll_deg: f32,
    pub speed_delta: f32,
}

/// Camera-as-airplane state flying over the terrain.
///
/// Advanced once per frame by a fixed distance `speed`; not tied to wall time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub position: Vec3,
    pub orientation: Quat,
    pub speed: f32,
}

impl Default for FlightState {
    fn default() -> Self {
        Self {
            position: INITIAL_POSITION,
            orientation: Quat::IDENTITY,
            speed: INITIAL_SPEED,
        }
    }
}

impl FlightState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the starting position, orientation and speed.
    pub fn reset(&mut self) {
        tracing::debug!("resetting plane");
        *self = Self::default();
    }

    /// Unit vector the plane is flying along.
    pub fn forward(&self) -> Vec3 {
        (self.orientation * INITIAL_DIRECTION).normalize()
    }

    /// Apply one frame of controls, then move forward by `speed`.
    pub fn advance(&mut self, controls: &FlightControls) {
        self.speed += controls.speed_delta;
        let delta = Quat::from_euler(
            EulerRot::ZYX,
            controls.roll_deg.to_radians(),
            0.0,
            controls.pitch_deg.to_radians(),
        );
        self.orientation = (self.orientation * delta).normalize();
        self.position += self.forward() * self.speed;
    }
}
