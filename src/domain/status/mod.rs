//! Status domain: backend operating mode, heartbeat and staleness.

pub mod client;

use serde::{Deserialize, Serialize};

/// Snapshot from `GET /status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Operating mode as reported (`PAPER`, `LIVE`, `OFFLINE`, ...).
    pub mode: String,
    #[serde(default)]
    pub last_cycle_ts_utc: Option<String>,
    #[serde(default)]
    pub is_stale: Option<bool>,
    #[serde(default)]
    pub stale_threshold_seconds: Option<f64>,
    #[serde(default)]
    pub heartbeat: Option<bool>,
    #[serde(default)]
    pub live_trading_enabled: Option<bool>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl Status {
    /// Whether the UI should show the staleness warning.
    pub fn is_stale(&self) -> bool {
        self.is_stale.unwrap_or(false)
    }

    pub fn live_trading_enabled(&self) -> bool {
        self.live_trading_enabled.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_offline_snapshot() {
        let status: Status = serde_json::from_str(
            r#"{"mode":"OFFLINE","last_cycle_ts_utc":"2025-01-01T00:00:00+00:00","is_stale":true,"stale_threshold_seconds":30}"#,
        )
        .unwrap();
        assert_eq!(status.mode, "OFFLINE");
        assert!(status.is_stale());
        assert_eq!(status.stale_threshold_seconds, Some(30.0));
        assert!(!status.live_trading_enabled());
    }

    #[test]
    fn test_deserialize_without_heartbeat_fields() {
        let status: Status = serde_json::from_str(
            r#"{"heartbeat":false,"mode":"PAPER","live_trading_enabled":false,"last_cycle_ts_utc":null,"meta":null}"#,
        )
        .unwrap();
        assert_eq!(status.heartbeat, Some(false));
        assert!(!status.is_stale());
        assert_eq!(status.last_cycle_ts_utc, None);
    }
}
