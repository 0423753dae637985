use std::thread::sleep;
use std::time::{Duration, Instant};

/// Fixed-rate frame limiter.
pub struct TickClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        TickClock { interval, last_tick: None }
    }

    /// Blocks until one interval has passed since the previous call. The first
    /// call waits a full interval. A frame that overran is not made up for.
    pub fn tick(&mut self) {
        let last_tick = *self.last_tick.get_or_insert_with(Instant::now);
        let elapsed = last_tick.elapsed();

        if let Some(remaining) = self.interval.checked_sub(elapsed) {
            sleep(remaining);
        }

        self.last_tick = Some(Instant::now());
    }
}
