//! Audit domain: the operator action log.

pub mod client;

use serde::{Deserialize, Serialize};

/// One audit log row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub ts_utc: String,
    pub actor: String,
    pub action: String,
    #[serde(default)]
    pub command_id: Option<i64>,
    /// JSON document stored as text by the backend.
    #[serde(default)]
    pub details_json: Option<String>,
}

impl AuditEntry {
    /// Parsed `details_json`, if present and valid JSON.
    pub fn details(&self) -> Option<serde_json::Value> {
        self.details_json
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
    }
}

/// Audit log as seen by the operator.
///
/// Deployments without the audit subsystem answer `404`; that is a
/// not-available state, not an error and not an empty log.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditView {
    Available(Vec<AuditEntry>),
    NotAvailable,
}

impl AuditView {
    pub fn entries(&self) -> &[AuditEntry] {
        match self {
            AuditView::Available(entries) => entries,
            AuditView::NotAvailable => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, AuditView::Available(_))
    }
}

/// Filter for `GET /audit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct AuditFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_ts_utc: Option<String>,
}
