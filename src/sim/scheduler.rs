/// Fixed-cadence tick scheduler.
///
/// The scheduler does not run anything itself: the frame loop asks how
/// many ticks are due at `now` and runs the tick body that many times.
/// Stopping it is how pause and game over freeze the simulation; there is
/// no per-tick "paused" flag.
///
/// Time is always passed in, so tests can drive it with synthetic instants.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct TickScheduler {
    interval: Duration,
    max_catch_up: u32,
    /// Instant of the last accounted tick; `None` while stopped.
    anchor: Option<Instant>,
}

impl TickScheduler {
    pub fn new(interval: Duration, max_catch_up: u32) -> Self {
        TickScheduler {
            interval: interval.max(Duration::from_micros(1)),
            max_catch_up: max_catch_up.max(1),
            anchor: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.anchor = None;
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Number of ticks elapsed since the last call, at most `max_catch_up`.
    /// Time beyond the cap is dropped rather than replayed later.
    pub fn due(&mut self, now: Instant) -> u32 {
        let anchor = match self.anchor {
            Some(a) => a,
            None => return 0,
        };
        let elapsed = now.saturating_duration_since(anchor);
        let whole = elapsed.as_nanos() / self.interval.as_nanos();
        if whole == 0 {
            return 0;
        }
        if whole > self.max_catch_up as u128 {
            self.anchor = Some(now);
            return self.max_catch_up;
        }
        let n = whole as u32;
        self.anchor = Some(anchor + self.interval * n);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn stopped_scheduler_never_fires() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(1), 64);
        assert!(!s.is_running());
        assert_eq!(s.due(t0 + ms(500)), 0);
    }

    #[test]
    fn counts_whole_intervals_and_keeps_remainder() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(10), 64);
        s.start(t0);
        assert_eq!(s.due(t0 + ms(5)), 0);
        assert_eq!(s.due(t0 + ms(25)), 2);
        // 5ms carried over from the previous call
        assert_eq!(s.due(t0 + ms(30)), 1);
        assert_eq!(s.due(t0 + ms(30)), 0);
    }

    #[test]
    fn catch_up_is_capped() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(1), 8);
        s.start(t0);
        assert_eq!(s.due(t0 + ms(1000)), 8);
        assert_eq!(s.due(t0 + ms(1000)), 0);
        assert_eq!(s.due(t0 + ms(1003)), 3);
    }

    #[test]
    fn stop_discards_elapsed_time() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(10), 64);
        s.start(t0);
        s.stop();
        assert_eq!(s.due(t0 + ms(100)), 0);
        s.start(t0 + ms(100));
        assert_eq!(s.due(t0 + ms(105)), 0);
        assert_eq!(s.due(t0 + ms(110)), 1);
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(10), 64);
        s.start(t0);
        s.start(t0 + ms(50));
        assert_eq!(s.due(t0 + ms(50)), 5);
    }
}
