use std::time::Duration;

/// Simulated time that only moves when the owner advances it by a fixed tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SimClock {
    now: Duration,
    tick: Duration,
}

impl SimClock {
    #[must_use]
    pub const fn new(tick: Duration) -> Self {
        Self { now: Duration::ZERO, tick }
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Change the tick length for subsequent advances.
    pub fn set_tick(&mut self, tick: Duration) {
        self.tick = tick;
    }

    /// Move forward one tick and return the new time.
    pub fn advance(&mut self) -> Duration {
        self.now += self.tick;
        self.now
    }
}
