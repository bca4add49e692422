//! Audit log view.

use crate::client::DashboardClient;
use crate::domain::audit::{AuditFilter, AuditView};
use crate::query::{QueryOptions, QuerySlot, QueryState};

/// One-shot audit log. A backend without the audit subsystem yields
/// `Ready(AuditView::NotAvailable)`; any other failure is `Unavailable`.
pub struct AuditLog {
    client: DashboardClient,
    filter: AuditFilter,
    entries: QuerySlot<AuditFilter, AuditView>,
}

impl AuditLog {
    pub fn new(client: &DashboardClient, filter: AuditFilter) -> Self {
        Self {
            client: client.clone(),
            filter,
            entries: QuerySlot::new(&QueryOptions::one_shot()),
        }
    }

    pub fn set_filter(&mut self, filter: AuditFilter) {
        self.filter = filter;
    }

    pub async fn load(&self) {
        let client = &self.client;
        self.entries
            .fetch(self.filter.clone(), |filter, _| async move {
                client.audit().list(&filter).await
            })
            .await;
    }

    pub async fn state(&self) -> QueryState<AuditView> {
        self.entries.state().await
    }
}
