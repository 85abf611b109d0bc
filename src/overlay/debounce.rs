use std::time::Duration;

/// Depth-one coalescing queue: each push replaces the pending value and
/// restarts its deadline, so only the trailing value of a burst comes out.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(T, Duration)>,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Takes effect from the next push; a pending value keeps its deadline.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn push(&mut self, value: T, now: Duration) {
        self.pending = Some((value, now + self.interval));
    }

    /// The pending value, once its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_zero_interval_yields_immediately() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.push(1, ms(10));
        assert_eq!(debouncer.poll(ms(10)), Some(1));
        assert_eq!(debouncer.poll(ms(10)), None);
    }

    #[test]
    fn test_burst_keeps_trailing_value() {
        let mut debouncer = Debouncer::new(ms(100));
        debouncer.push(1, ms(0));
        debouncer.push(2, ms(40));
        debouncer.push(3, ms(80));
        assert_eq!(debouncer.poll(ms(120)), None);
        assert_eq!(debouncer.poll(ms(180)), Some(3));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_push_restarts_deadline() {
        let mut debouncer = Debouncer::new(ms(50));
        debouncer.push("a", ms(0));
        debouncer.push("b", ms(45));
        assert_eq!(debouncer.poll(ms(60)), None);
        assert_eq!(debouncer.poll(ms(95)), Some("b"));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::new(ms(10));
        debouncer.push(7, ms(0));
        debouncer.cancel();
        assert_eq!(debouncer.poll(ms(1000)), None);
    }

    #[test]
    fn test_set_interval_applies_to_next_push() {
        let mut debouncer = Debouncer::new(ms(10));
        debouncer.push(1, ms(0));
        debouncer.set_interval(ms(100));
        assert_eq!(debouncer.poll(ms(10)), Some(1));
        debouncer.push(2, ms(10));
        assert_eq!(debouncer.poll(ms(50)), None);
        assert_eq!(debouncer.interval(), ms(100));
    }
}
