use std::time::{Duration, Instant};

/// Default spacing between token-driven emissions (≤ 20 Hz).
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

/// Leading-edge throttle: the first call passes, then at most one per `interval`.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_emit: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether an emission at `now` is allowed.
    pub fn ready(&self, now: Instant) -> bool {
        match self.last_emit {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last_emit = Some(now);
    }

    pub fn reset(&mut self) {
        self.last_emit = None;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_is_ready() {
        let throttle = Throttle::default();
        assert!(throttle.ready(Instant::now()));
    }

    #[test]
    fn test_blocks_until_interval_elapses() {
        let mut throttle = Throttle::new(Duration::from_millis(50));
        let t0 = Instant::now();
        throttle.mark(t0);

        assert!(!throttle.ready(t0));
        assert!(!throttle.ready(t0 + Duration::from_millis(49)));
        assert!(throttle.ready(t0 + Duration::from_millis(50)));
    }

    #[test]
    fn test_reset_forgets_last_emission() {
        let mut throttle = Throttle::default();
        let t0 = Instant::now();
        throttle.mark(t0);
        throttle.reset();
        assert!(throttle.ready(t0));
    }

    #[test]
    fn test_zero_interval_never_blocks() {
        let mut throttle = Throttle::new(Duration::ZERO);
        let t0 = Instant::now();
        throttle.mark(t0);
        assert!(throttle.ready(t0));
    }
}
