use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Frames spent travelling each side of the square path.
pub const SQUARE_STEPS: u32 = 250;
/// Corners of the square the block logo circles, counter-clockwise.
pub const SQUARE_CORNERS: [Vec2; 4] = [
    Vec2::new(0.3, 0.3),
    Vec2::new(-0.3, 0.3),
    Vec2::new(-0.3, -0.3),
    Vec2::new(0.3, -0.3),
];
pub const SCALE_MIN: f32 = 0.5;
pub const SCALE_MAX: f32 = 1.25;
pub const BALL_RADIUS: f32 = 0.25;
/// Roughly 30 degrees up and to the right.
pub const BALL_VELOCITY: Vec2 = Vec2::new(0.5, 0.8666);

/// Which of the two logo animations is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogoMode {
    #[default]
    Block,
    Ball,
}

/// A ball bouncing inside the `[-1, 1]²` clip square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BouncingBall {
    pub center: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Default for BouncingBall {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            velocity: BALL_VELOCITY,
            radius: BALL_RADIUS,
        }
    }
}

impl BouncingBall {
    /// Flip any velocity component heading out through a wall, then move.
    ///
    /// Components already pointing back inside are left alone.
    pub fn advance(&mut self, dt: f32) {
        for axis in 0..2 {
            let c = self.center[axis];
            let v = self.velocity[axis];
            let leaving_high = c + self.radius > 1.0 && v > 0.0;
            let leaving_low = c - self.radius < -1.0 && v < 0.0;
            if leaving_high || leaving_low {
                self.velocity[axis] = -v;
            }
        }
        self.center += self.velocity * dt;
    }

    /// Back to the origin. Velocity keeps its current heading.
    pub fn reset(&mut self) {
        self.center = Vec2::ZERO;
    }
}

/// State of the dancing logo animations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogoState {
    pub mode: LogoMode,
    /// Rotation about Z in degrees, wrapped back to 0 past 360.
    pub angle_deg: f32,
    pub scale: f32,
    /// +1 while growing, -1 while shrinking.
    pub scale_direction: f32,
    /// Index into [`SQUARE_CORNERS`] of the corner last left.
    pub corner: usize,
    pub corner_step: u32,
    pub ball: BouncingBall,
}

impl Default for LogoState {
    fn default() -> Self {
        Self {
            mode: LogoMode::Block,
            angle_deg: 0.0,
            scale: 1.0,
            scale_direction: 1.0,
            corner: 0,
            corner_step: 0,
            ball: BouncingBall::default(),
        }
    }
}

impl LogoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the active animation by `dt` seconds at slider `speed`.
    ///
    /// `speed` is degrees per second for the block; the ball moves at
    /// `speed / 100` times its velocity.
    pub fn advance(&mut self, dt: f32, speed: f32) {
        match self.mode {
            LogoMode::Block => self.advance_block(dt, speed),
            LogoMode::Ball => self.ball.advance(dt * speed / 100.0),
        }
    }

    fn advance_block(&mut self, dt: f32, speed: f32) {
        self.angle_deg += speed * dt;
        if self.angle_deg > 360.0 {
            self.angle_deg = 0.0;
        }

        // The path advances per frame, not per second.
        self.corner_step += 1;
        if self.corner_step > SQUARE_STEPS {
            self.corner = (self.corner + 1) % SQUARE_CORNERS.len();
            self.corner_step = 0;
        }

        self.scale += speed / 100.0 * dt * self.scale_direction;
        if self.scale > SCALE_MAX {
            self.scale_direction = -1.0;
        } else if self.scale < SCALE_MIN {
            self.scale_direction = 1.0;
        }
    }

    /// Switch to the other animation, putting the ball back at the origin.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LogoMode::Block => LogoMode::Ball,
            LogoMode::Ball => LogoMode::Block,
        };
        self.ball.reset();
        tracing::debug!(mode = ?self.mode, "logo mode switched");
    }

    /// Offset of the block along its square path.
    pub fn path_offset(&self) -> Vec2 {
        let from = SQUARE_CORNERS[self.corner];
        let to = SQUARE_CORNERS[(self.corner + 1) % SQUARE_CORNERS.len()];
        from + (to - from) * (self.corner_step as f32 / SQUARE_STEPS as f32)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.angle_deg.to_radians())
    }

    /// Model matrix for the block: uniform scale, then rotation about Z.
    pub fn model_matrix(&self) -> Mat4 {
        let scale = Vec3::splat(self.scale);
        Mat4::from_scale_rotation_translation(scale, self.rotation(), Vec3::ZERO)
    }
}
