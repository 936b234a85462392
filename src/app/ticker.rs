use std::time::{Duration, Instant};

/// A repeating deadline driving the visualization.
///
/// Nothing here touches the work being scheduled: changing the interval only moves the next
/// deadline.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    /// Creates a ticker whose first tick is due one `interval` after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// How long until the next tick, zero if it is already due.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Consumes the current tick and schedules the next one.
    ///
    /// Missed ticks are dropped rather than replayed in a burst.
    pub fn advance(&mut self, now: Instant) {
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
    }

    /// Cancels the pending tick and schedules the next one `interval` after `now`.
    pub fn rearm(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next_due = now + interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_after_interval() {
        let now = Instant::now();
        let ticker = Ticker::new(Duration::from_millis(100), now);
        assert!(!ticker.is_due(now));
        assert_eq!(ticker.time_until_due(now), Duration::from_millis(100));
        assert!(ticker.is_due(now + Duration::from_millis(100)));
        assert_eq!(
            ticker.time_until_due(now + Duration::from_millis(150)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_advance_keeps_cadence() {
        let now = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(10), now);
        let first = now + Duration::from_millis(12);
        ticker.advance(first);
        // Next deadline is anchored to the schedule, not to when the tick ran
        assert_eq!(ticker.time_until_due(first), Duration::from_millis(8));
    }

    #[test]
    fn test_advance_skips_missed_ticks() {
        let now = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(10), now);
        let late = now + Duration::from_millis(55);
        ticker.advance(late);
        assert_eq!(ticker.time_until_due(late), Duration::from_millis(10));
    }

    #[test]
    fn test_rearm_replaces_pending_tick() {
        let now = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(100), now);
        let later = now + Duration::from_millis(30);
        ticker.rearm(Duration::from_millis(20), later);
        assert_eq!(ticker.interval(), Duration::from_millis(20));
        assert!(!ticker.is_due(later));
        assert!(ticker.is_due(later + Duration::from_millis(20)));
    }
}
