/// A decrementing clock that saturates at zero.
///
/// Used as the per-object collision cooldown: while the timer is ticking,
/// contacts with the object it belongs to are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CountdownTimer {
    remaining: f32,
}

impl CountdownTimer {
    /// A stopped timer (`remaining == 0`).
    pub fn new() -> Self {
        Self { remaining: 0.0 }
    }

    /// Start a timer that is already counting down from `duration`.
    pub fn started(duration: f32) -> Self {
        let mut timer = Self::new();
        timer.set(duration);
        timer
    }

    /// Overwrite the remaining time. Negative durations leave the timer stopped.
    pub fn set(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Count down by `dt`, saturating at zero.
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Whether any time remains.
    pub fn is_ticking(&self) -> bool {
        self.remaining > 0.0
    }

    /// Remaining time in seconds.
    pub fn time(&self) -> f32 {
        self.remaining
    }
}
