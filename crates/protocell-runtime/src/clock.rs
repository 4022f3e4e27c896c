//! Simulation clock: turns elapsed real time into due day ticks.

use std::time::Duration;

/// Accumulates frame time and reports how many whole days have elapsed.
/// The remainder carries over, so slow frames catch up instead of
/// dropping days.
#[derive(Debug, Clone)]
pub struct SimClock {
    day_length: Duration,
    accumulator: Duration,
    elapsed: Duration,
    days_fired: u64,
}

impl SimClock {
    pub fn new(day_length: Duration) -> Self {
        Self {
            day_length,
            accumulator: Duration::ZERO,
            elapsed: Duration::ZERO,
            days_fired: 0,
        }
    }

    pub fn day_length(&self) -> Duration {
        self.day_length
    }

    /// Add `elapsed` and return the number of day ticks now due.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        self.elapsed += elapsed;
        self.accumulator += elapsed;
        let day_nanos = self.day_length.as_nanos();
        if day_nanos == 0 {
            return 0;
        }
        let due = self.accumulator.as_nanos() / day_nanos;
        let remainder = self.accumulator.as_nanos() % day_nanos;
        self.accumulator = Duration::from_nanos(remainder as u64);
        self.days_fired += due as u64;
        due as u64
    }

    /// Fraction of the way to the next day, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        if self.day_length.is_zero() {
            return 0.0;
        }
        self.accumulator.as_secs_f64() / self.day_length.as_secs_f64()
    }

    /// Total real time fed to the clock.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn days_fired(&self) -> u64 {
        self.days_fired
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.days_fired = 0;
    }
}
