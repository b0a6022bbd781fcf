//! Fixed-timestep clock.
//!
//! The browser draw callback fires at display rate with a variable delta;
//! this converts it into discrete game ticks so logic stays deterministic.

/// Engine tick rate. One passive-income second is `TICKS_PER_SEC` ticks.
pub const TICKS_PER_SEC: u32 = 10;

/// Largest frame delta honored, in ms. Anything longer (backgrounded tab)
/// is clamped instead of replayed.
const MAX_FRAME_MS: f64 = 500.0;

pub struct GameTime {
    step_ms: f64,
    carry_ms: f64,
    last_ms: Option<f64>,
    pub total_ticks: u64,
}

impl GameTime {
    pub fn new() -> Self {
        Self {
            step_ms: 1000.0 / TICKS_PER_SEC as f64,
            carry_ms: 0.0,
            last_ms: None,
            total_ticks: 0,
        }
    }

    /// Feed the current timestamp; returns how many whole ticks elapsed.
    /// The first call only establishes the baseline and yields zero.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_ms {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        self.carry_ms += delta;
        let ticks = (self.carry_ms / self.step_ms) as u32;
        self.carry_ms -= ticks as f64 * self.step_ms;
        self.total_ticks += ticks as u64;
        ticks
    }
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new()
    }
}
