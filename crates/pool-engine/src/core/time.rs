/// Wall-clock frame timer.
/// Produces one delta per rendered frame; the physics step uses it unchanged for every ball.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Timestamp of the previous frame, in seconds. `None` before the first frame.
    last: Option<f64>,
    /// Delta computed by the most recent `advance`.
    dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None, dt: 0.0 }
    }

    /// Record the current time and return the elapsed seconds since the previous frame.
    /// The first call returns 0. A clock that jumps backwards yields 0 rather than a negative delta.
    pub fn advance(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(prev) if now.is_finite() => (now - prev).max(0.0) as f32,
            _ => 0.0,
        };
        if now.is_finite() {
            self.last = Some(now);
        }
        self.dt = dt;
        dt
    }

    /// Delta of the current frame.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Forget the previous timestamp (e.g. after the host was paused).
    pub fn restart(&mut self) {
        self.last = None;
        self.dt = 0.0;
    }
}
