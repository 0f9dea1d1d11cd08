use std::time::Duration;

/// Exponential delay between reconnect attempts.
///
/// The first retry waits `base`, each further one doubles, never exceeding `max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectBackoff {
    base: Duration,
    max: Duration,
    attempts: u32,
}

impl ReconnectBackoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            attempts: 0,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let factor = 2u32.saturating_pow(self.attempts);
        self.attempts = self.attempts.saturating_add(1);
        self.base.saturating_mul(factor).min(self.max)
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_until_capped() {
        let mut backoff =
            ReconnectBackoff::new(Duration::from_millis(1_000), Duration::from_millis(5_000));

        let delays: Vec<u128> = (0..5).map(|_| backoff.next_delay().as_millis()).collect();

        assert_eq!(delays, vec![1_000, 2_000, 4_000, 5_000, 5_000]);
        assert_eq!(backoff.attempts(), 5);
    }

    #[test]
    fn reset_starts_over_from_base_delay() {
        let mut backoff =
            ReconnectBackoff::new(Duration::from_millis(100), Duration::from_millis(5_000));
        backoff.next_delay();
        backoff.next_delay();

        backoff.reset();

        assert_eq!(backoff.next_delay(), Duration::from_millis(100));
    }

    #[test]
    fn many_attempts_do_not_overflow() {
        let mut backoff = ReconnectBackoff::new(Duration::from_secs(1), Duration::from_secs(5));
        for _ in 0..100 {
            backoff.next_delay();
        }

        assert_eq!(backoff.next_delay(), Duration::from_secs(5));
    }
}
