/// Converts the host's millisecond animation timestamps into step lengths.
///
/// The first frame only records the time. A timestamp that is not finite or
/// does not move forward yields a zero step; a backwards jump resynchronizes
/// the clock to the new time.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    previous_secs: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call.
    pub fn tick(&mut self, current_time_ms: f64) -> f32 {
        if !current_time_ms.is_finite() {
            tracing::warn!(current_time_ms, "ignoring non-finite frame timestamp");
            return 0.0;
        }
        let now = current_time_ms * 0.001;
        let dt = match self.previous_secs {
            Some(prev) if now > prev => now - prev,
            Some(prev) if now < prev => {
                tracing::debug!(prev, now, "frame clock went backwards, resyncing");
                0.0
            }
            _ => 0.0,
        };
        self.previous_secs = Some(now);
        dt as f32
    }

    /// Forget the previous timestamp.
    pub fn reset(&mut self) {
        self.previous_secs = None;
    }

    pub fn previous_secs(&self) -> Option<f64> {
        self.previous_secs
    }
}
