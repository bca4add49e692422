//! Environment-driven configuration.

use std::time::Duration;

use crate::network::{DEFAULT_API_URL, DEFAULT_POLL_INTERVAL};

/// Base API origin override.
pub const ENV_API_BASE_URL: &str = "SCALP_API_BASE_URL";
/// Poll interval override, in milliseconds.
pub const ENV_POLL_MS: &str = "SCALP_POLL_MS";

/// Externally configurable client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub poll_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl DashboardConfig {
    /// Load `.env` (if present) and read overrides from the environment.
    ///
    /// Unset, empty, unparseable or zero values fall back to the defaults.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env` and tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base_url = lookup(ENV_API_BASE_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base_url);

        let poll_interval = lookup(ENV_POLL_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);

        Self {
            api_base_url,
            poll_interval,
        }
    }
}
