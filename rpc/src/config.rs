//! Retry and backoff configuration

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry behavior for calls against a single endpoint.
///
/// The defaults reproduce the dashboard's schedule: three attempts,
/// 1s/2s/4s exponential backoff plus up to 500ms of jitter, capped at 5s.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per endpoint before the call is declared exhausted.
    pub max_attempts: u32,
    /// Backoff after the first failed attempt, in milliseconds.
    pub base_delay_ms: u64,
    /// Exclusive upper bound on the random jitter added to each delay.
    pub jitter_ms: u64,
    /// Cap applied to the jittered delay.
    pub max_delay_ms: u64,
    /// Per-attempt HTTP timeout. A hung connection counts as a failed
    /// attempt instead of blocking the retry loop forever.
    pub request_timeout_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            jitter_ms: 500,
            max_delay_ms: 5_000,
            request_timeout_ms: 5_000,
        }
    }
}

impl RetryConfig {
    /// Delay to sleep after failed attempt `attempt` (1-based):
    /// `min(base * 2^(attempt-1) + jitter, cap)`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1);
        let exponential = self
            .base_delay_ms
            .saturating_mul(1u64.checked_shl(shift).unwrap_or(u64::MAX));
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..self.jitter_ms)
        };
        Duration::from_millis(exponential.saturating_add(jitter).min(self.max_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_exponentially_within_jitter_band() {
        let config = RetryConfig::default();
        for attempt in 1..=3u32 {
            let base = 1_000u64 * 2u64.pow(attempt - 1);
            for _ in 0..50 {
                let delay = config.backoff_delay(attempt).as_millis() as u64;
                assert!(
                    (base..base + 500).contains(&delay),
                    "attempt {attempt}: delay {delay} outside [{base}, {})",
                    base + 500
                );
            }
        }
    }

    #[test]
    fn backoff_is_capped() {
        let config = RetryConfig::default();
        // 1000 * 2^3 = 8000 > 5000, so the cap always wins.
        for _ in 0..50 {
            assert_eq!(config.backoff_delay(4).as_millis(), 5_000);
        }
        assert_eq!(config.backoff_delay(60).as_millis(), 5_000);
    }

    #[test]
    fn zero_jitter_is_deterministic() {
        let config = RetryConfig {
            jitter_ms: 0,
            ..RetryConfig::default()
        };
        assert_eq!(config.backoff_delay(1).as_millis(), 1_000);
        assert_eq!(config.backoff_delay(2).as_millis(), 2_000);
        assert_eq!(config.backoff_delay(3).as_millis(), 4_000);
    }

    #[test]
    fn huge_attempt_numbers_do_not_overflow() {
        let config = RetryConfig::default();
        assert_eq!(config.backoff_delay(u32::MAX).as_millis(), 5_000);
    }
}
