//! Audit sub-client.

use crate::client::DashboardClient;
use crate::domain::audit::{AuditEntry, AuditFilter, AuditView};
use crate::error::DashboardError;
use crate::http::{with_query, RetryPolicy};

pub struct Audit<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Audit<'a> {
    /// One-shot read, never retried. A `404` maps to [`AuditView::NotAvailable`];
    /// every other failure is returned.
    pub async fn list(&self, filter: &AuditFilter) -> Result<AuditView, DashboardError> {
        let path = with_query("/audit", filter)?;
        match self
            .client
            .http
            .get::<Vec<AuditEntry>>(&path, RetryPolicy::None)
            .await
        {
            Ok(entries) => Ok(AuditView::Available(entries)),
            Err(e) if e.is_not_found() => {
                tracing::debug!("audit log not available on this backend");
                Ok(AuditView::NotAvailable)
            }
            Err(e) => Err(e.into()),
        }
    }
}
