//! Gate domain: per-pair allow/hold verdicts and the badge derived from them.

pub mod client;

use serde::{Deserialize, Serialize};

use crate::shared::fmt::{badge_variant, BadgeVariant};
use crate::shared::Pair;

/// Reason shown when a pair has no decision or the decision has no reasons.
pub const NO_REASON: &str = "n/a";

/// A gate verdict from `GET /gates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateDecision {
    #[serde(default)]
    pub ts_utc: Option<String>,
    #[serde(default)]
    pub pair: Option<Pair>,
    pub allowed: bool,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub snapshot_json: Option<serde_json::Value>,
}

impl GateDecision {
    pub fn primary_reason(&self) -> Option<&str> {
        self.reasons.first().map(String::as_str)
    }
}

/// Verdict shown on a pair card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateStatus {
    Pass,
    Hold,
}

impl GateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Pass => "PASS",
            GateStatus::Hold => "HOLD",
        }
    }

    pub fn variant(&self) -> BadgeVariant {
        badge_variant(self.as_str())
    }
}

impl std::fmt::Display for GateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Badge derived from the latest decision for a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateBadge {
    pub status: GateStatus,
    pub reason: String,
}

impl GateBadge {
    /// A missing decision shows as HOLD with no reason.
    pub fn from_latest(decision: Option<&GateDecision>) -> Self {
        let status = match decision {
            Some(d) if d.allowed => GateStatus::Pass,
            _ => GateStatus::Hold,
        };
        let reason = decision
            .and_then(GateDecision::primary_reason)
            .filter(|r| !r.is_empty())
            .unwrap_or(NO_REASON)
            .to_string();
        Self { status, reason }
    }
}

/// Filter for `GET /gates`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct GateFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<Pair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl GateFilter {
    /// Only the most recent decision for `pair`.
    pub fn latest(pair: Pair) -> Self {
        Self {
            pair: Some(pair),
            limit: Some(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(allowed: bool, reasons: &[&str]) -> GateDecision {
        GateDecision {
            ts_utc: None,
            pair: None,
            allowed,
            reasons: reasons.iter().map(|r| r.to_string()).collect(),
            snapshot_json: None,
        }
    }

    #[test]
    fn test_hold_with_reason() {
        let badge = GateBadge::from_latest(Some(&decision(false, &["paused"])));
        assert_eq!(badge.status, GateStatus::Hold);
        assert_eq!(badge.reason, "paused");
        assert_eq!(badge.status.variant(), BadgeVariant::Yellow);
    }

    #[test]
    fn test_pass_without_reasons() {
        let badge = GateBadge::from_latest(Some(&decision(true, &[])));
        assert_eq!(badge.status, GateStatus::Pass);
        assert_eq!(badge.reason, NO_REASON);
        assert_eq!(badge.status.variant(), BadgeVariant::Green);
    }

    #[test]
    fn test_missing_decision_is_hold() {
        let badge = GateBadge::from_latest(None);
        assert_eq!(badge.status, GateStatus::Hold);
        assert_eq!(badge.reason, NO_REASON);
    }

    #[test]
    fn test_minimal_decision_deserializes() {
        let d: GateDecision = serde_json::from_str(r#"{"allowed":false,"reasons":["paused"]}"#).unwrap();
        assert!(!d.allowed);
        assert_eq!(d.primary_reason(), Some("paused"));
        assert_eq!(d.pair, None);
    }

    #[test]
    fn test_latest_filter_query() {
        let q = serde_urlencoded::to_string(GateFilter::latest(Pair::from("EUR_USD"))).unwrap();
        assert_eq!(q, "pair=EUR_USD&limit=1");
    }
}
