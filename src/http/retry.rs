//! Retry policies for HTTP requests.
//!
//! The HTTP layer never retries on its own: every call site names its policy.
//! One-shot reads (settings, audit, the role probe) and every command use
//! [`RetryPolicy::None`]. Polled reads use whatever the client was built with,
//! which is also `None` unless the operator opts in.

use std::time::Duration;

use rand::Rng;

use crate::error::{ApiErrorKind, HttpError};

/// How many times a request may be attempted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RetryPolicy {
    #[default]
    None,
    /// Transient failures of an idempotent read: no response at all,
    /// `429`, or a gateway status.
    Idempotent,
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// Retries for polled reads that always finish before the next tick.
    pub fn within_poll(interval: Duration) -> Self {
        RetryPolicy::Custom(RetryConfig::within_poll(interval))
    }

    /// `None` means a single attempt.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::default()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Extra attempts after the first.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread each delay by up to ±25%.
    pub jitter: bool,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(2),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Backoff whose worst-case total stays under half of `interval`, so a
    /// retried poll never runs into the next one.
    pub fn within_poll(interval: Duration) -> Self {
        let budget = interval / 2;
        let defaults = Self::default();
        let mut config = Self {
            max_delay: defaults.max_delay.min(budget),
            ..defaults
        };
        while config.max_retries > 0 && config.worst_case_total() > budget {
            config.max_retries -= 1;
        }
        config
    }

    /// Sum of every backoff delay at the top of the jitter range.
    pub fn worst_case_total(&self) -> Duration {
        let spread = if self.jitter { 1.25 } else { 1.0 };
        (0..self.max_retries)
            .map(|attempt| scale(self.base_delay(attempt), spread))
            .sum()
    }

    /// Only transient failures qualify. A 401 or 403 is an answer about the
    /// session and must surface immediately.
    pub fn should_retry(&self, error: &HttpError) -> bool {
        match error {
            HttpError::Api(api) => match api.kind() {
                ApiErrorKind::Unauthenticated | ApiErrorKind::Forbidden => false,
                _ => self.retryable_statuses.contains(&api.status),
            },
            #[cfg(not(target_arch = "wasm32"))]
            HttpError::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            #[cfg(target_arch = "wasm32")]
            HttpError::Transport(e) => e.is_timeout() || e.is_request(),
            HttpError::Decode(_) | HttpError::Encode(_) | HttpError::MaxRetriesExceeded { .. } => {
                false
            }
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.base_delay(attempt);
        if !self.jitter {
            return base;
        }
        scale(base, rand::thread_rng().gen_range(0.75..=1.25))
    }

    fn base_delay(&self, attempt: u32) -> Duration {
        scale(self.initial_delay, self.backoff_factor.powi(attempt as i32)).min(self.max_delay)
    }
}

/// Millisecond resolution is plenty for backoff.
fn scale(delay: Duration, factor: f64) -> Duration {
    Duration::from_millis((delay.as_millis() as f64 * factor).round() as u64)
}
