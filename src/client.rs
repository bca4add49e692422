//! High-level client: `DashboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared session state, and accessor methods.

use crate::auth::client::Auth;
use crate::auth::SessionState;
use crate::config::DashboardConfig;
use crate::domain::audit::client::Audit;
use crate::domain::command::client::Commands;
use crate::domain::gate::client::Gates;
use crate::domain::position::client::Positions;
use crate::domain::settings::client::SettingsClient;
use crate::domain::status::client::StatusClient;
use crate::domain::strategy_params::client::StrategyParams;
use crate::domain::trade::client::Trades;
use crate::error::DashboardError;
use crate::http::{DashboardHttp, RetryPolicy};

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::audit::client::Audit as AuditClient;
pub use crate::domain::command::client::Commands as CommandsClient;
pub use crate::domain::gate::client::Gates as GatesClient;
pub use crate::domain::position::client::Positions as PositionsClient;
pub use crate::domain::strategy_params::client::StrategyParams as StrategyParamsClient;
pub use crate::domain::trade::client::Trades as TradesClient;

/// The primary entry point for the dashboard client.
///
/// Provides nested sub-client accessors for each domain:
/// `client.status()`, `client.commands()`, etc. Cloning is cheap and clones
/// share the transport (and therefore the session cookie) and session state.
#[derive(Clone)]
pub struct DashboardClient {
    pub(crate) http: DashboardHttp,
    pub(crate) session: Arc<RwLock<SessionState>>,
    /// Refresh interval for polled views (status, gates, positions).
    pub(crate) poll_interval: Duration,
    /// Retry policy for polled reads. One-shot reads ignore it.
    pub(crate) poll_retry: RetryPolicy,
}

impl DashboardClient {
    pub fn builder() -> DashboardClientBuilder {
        DashboardClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn status(&self) -> StatusClient<'_> {
        StatusClient { client: self }
    }

    pub fn settings(&self) -> SettingsClient<'_> {
        SettingsClient { client: self }
    }

    pub fn gates(&self) -> Gates<'_> {
        Gates { client: self }
    }

    pub fn positions(&self) -> Positions<'_> {
        Positions { client: self }
    }

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    pub fn commands(&self) -> Commands<'_> {
        Commands { client: self }
    }

    pub fn audit(&self) -> Audit<'_> {
        Audit { client: self }
    }

    pub fn strategy_params(&self) -> StrategyParams<'_> {
        StrategyParams { client: self }
    }

    /// Raw transport, for calls without a typed sub-client.
    pub fn http(&self) -> &DashboardHttp {
        &self.http
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn poll_retry(&self) -> &RetryPolicy {
        &self.poll_retry
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct DashboardClientBuilder {
    base_url: String,
    poll_interval: Duration,
    poll_retry: RetryPolicy,
}

impl Default for DashboardClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            poll_interval: crate::network::DEFAULT_POLL_INTERVAL,
            poll_retry: RetryPolicy::None,
        }
    }
}

impl DashboardClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Opt polled reads into a retry policy. Defaults to a single attempt.
    pub fn poll_retry(mut self, policy: RetryPolicy) -> Self {
        self.poll_retry = policy;
        self
    }

    /// Seed the builder from an environment-derived config.
    pub fn from_config(self, config: &DashboardConfig) -> Self {
        self.base_url(&config.api_base_url)
            .poll_interval(config.poll_interval)
    }

    pub fn build(self) -> Result<DashboardClient, DashboardError> {
        if self.poll_interval.is_zero() {
            return Err(DashboardError::Other(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(DashboardClient {
            http: DashboardHttp::new(&self.base_url),
            session: Arc::new(RwLock::new(SessionState::Unauthenticated)),
            poll_interval: self.poll_interval,
            poll_retry: self.poll_retry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = DashboardClient::builder().build().unwrap();
        assert_eq!(client.http().base_url(), "http://127.0.0.1:8000");
        assert_eq!(client.poll_interval(), Duration::from_millis(3000));
        assert_eq!(client.poll_retry(), &RetryPolicy::None);
    }

    #[test]
    fn test_builder_rejects_zero_interval() {
        let result = DashboardClient::builder()
            .poll_interval(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_from_config() {
        let config = DashboardConfig {
            api_base_url: "http://backend:9000/".to_string(),
            poll_interval: Duration::from_millis(500),
        };
        let client = DashboardClient::builder().from_config(&config).build().unwrap();
        assert_eq!(client.http().base_url(), "http://backend:9000");
        assert_eq!(client.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_new_client_is_unauthenticated() {
        let client = DashboardClient::builder().build().unwrap();
        let state = tokio_test::block_on(client.auth().session());
        assert_eq!(state, SessionState::Unauthenticated);
    }
}
