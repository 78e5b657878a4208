/// Monotonic elapsed-time clock fed by host frame deltas.
///
/// Time is accumulated in f64 so long sessions don't lose precision in the
/// `elapsed * speed` products computed from it.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    elapsed: f64,
    ticks: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame delta (seconds) and return the new elapsed time.
    /// Negative or non-finite deltas are ignored, so elapsed never decreases.
    pub fn advance(&mut self, frame_dt: f32) -> f64 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.elapsed += frame_dt as f64;
        }
        self.ticks += 1;
        self.elapsed
    }

    /// Total elapsed seconds since the clock was created.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of `advance` calls so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
