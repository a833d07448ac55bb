//! Retry policy for transport failures
//!
//! Exponential backoff with multiplicative jitter, attached to the client's
//! send path. `max_attempts = 1` disables retries entirely.

use std::time::Duration;

use rand::Rng;

/// Configurable retry strategy
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Backoff before the first retry
    pub base_delay: Duration,
    /// Upper bound on any single backoff
    pub max_delay: Duration,
    /// Jitter fraction in `[0, 1)`; each backoff is scaled by a random
    /// factor in `[1 - jitter, 1 + jitter)`
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            jitter: 0.2,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Deterministic backoff before retry `attempt` (1-based), without jitter
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(20);
        let delay = self.base_delay.saturating_mul(2u32.saturating_pow(exponent));
        delay.min(self.max_delay)
    }

    /// Backoff with jitter applied
    pub fn jittered_backoff(&self, attempt: u32) -> Duration {
        let base = self.backoff(attempt);
        if self.jitter <= 0.0 {
            return base;
        }
        let factor = 1.0 + rand::thread_rng().gen_range(-self.jitter..self.jitter);
        base.mul_f64(factor.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            jitter: 0.0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(500));
        assert_eq!(policy.backoff(2), Duration::from_millis(1000));
        assert_eq!(policy.backoff(3), Duration::from_millis(2000));
    }

    #[test]
    fn test_backoff_caps_at_max_delay() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(10), policy.max_delay);
        assert_eq!(policy.backoff(u32::MAX), policy.max_delay);
    }

    #[test]
    fn test_jittered_backoff_stays_in_band() {
        let policy = RetryPolicy::default();
        let base = policy.backoff(2).as_secs_f64();
        for _ in 0..100 {
            let jittered = policy.jittered_backoff(2).as_secs_f64();
            assert!(jittered >= base * (1.0 - policy.jitter) - f64::EPSILON);
            assert!(jittered < base * (1.0 + policy.jitter) + f64::EPSILON);
        }
    }

    #[test]
    fn test_none_policy_single_attempt() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_attempts, 1);
    }
}
