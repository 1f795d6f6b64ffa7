use std::thread;
use std::time::{Duration, Instant};

use macroquad::time::get_time;

/// Fixed-cadence rate limiter: sleeps away whatever is left of the tick
/// budget once the tick's work is done.
#[derive(Copy, Clone, Debug)]
pub struct FrameLimiter {
    budget: Duration,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self { budget: Duration::from_millis(1000 / u64::from(fps.max(1))) }
    }

    #[cfg(test)]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left in the budget, `None` if the tick overran it.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.budget.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    pub fn wait(&self, tick_started: Instant) {
        match self.remaining(tick_started.elapsed()) {
            Some(rest) => thread::sleep(rest),
            None => log::trace!("tick overran its {:?} budget", self.budget),
        }
    }
}

/// Milliseconds since startup, the time base of the simulation. Reads
/// macroquad's frame clock.
pub struct GameClock {
    start: f64,
}

impl GameClock {
    pub fn start() -> Self {
        Self { start: get_time() }
    }

    pub fn now_ms(&self) -> u64 {
        self.elapsed_ms(get_time())
    }

    fn elapsed_ms(&self, seconds: f64) -> u64 {
        ((seconds - self.start).max(0.0) * 1000.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_follows_fps() {
        assert_eq!(FrameLimiter::new(10).budget(), Duration::from_millis(100));
        assert_eq!(FrameLimiter::new(15).budget(), Duration::from_millis(66));
        assert_eq!(FrameLimiter::new(0).budget(), Duration::from_millis(1000));
    }

    #[test]
    fn remaining_time_until_budget() {
        let limiter = FrameLimiter::new(10);
        assert_eq!(limiter.remaining(Duration::from_millis(30)), Some(Duration::from_millis(70)));
        assert_eq!(limiter.remaining(Duration::from_millis(100)), None);
        assert_eq!(limiter.remaining(Duration::from_millis(250)), None);
    }

    #[test]
    fn clock_counts_millis_from_start() {
        let clock = GameClock { start: 1.5 };
        assert_eq!(clock.elapsed_ms(1.5), 0);
        assert_eq!(clock.elapsed_ms(4.5), 3_000);
        assert_eq!(clock.elapsed_ms(1.0), 0);
    }
}
