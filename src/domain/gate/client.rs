//! Gates sub-client: latest gate decisions per pair.

use crate::client::DashboardClient;
use crate::domain::gate::{GateDecision, GateFilter};
use crate::error::DashboardError;
use crate::http::{with_query, RetryPolicy};
use crate::shared::Pair;

pub struct Gates<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Gates<'a> {
    /// Decisions matching `filter`, newest first. Uses the client's poll
    /// retry policy.
    pub async fn list(&self, filter: &GateFilter) -> Result<Vec<GateDecision>, DashboardError> {
        self.list_with(filter, self.client.poll_retry.clone()).await
    }

    pub async fn list_with(
        &self,
        filter: &GateFilter,
        retry: RetryPolicy,
    ) -> Result<Vec<GateDecision>, DashboardError> {
        let path = with_query("/gates", filter)?;
        Ok(self.client.http.get(&path, retry).await?)
    }

    /// The single most recent decision for `pair` (`limit=1`).
    pub async fn latest(&self, pair: &Pair) -> Result<Option<GateDecision>, DashboardError> {
        self.latest_with(pair, self.client.poll_retry.clone()).await
    }

    pub async fn latest_with(
        &self,
        pair: &Pair,
        retry: RetryPolicy,
    ) -> Result<Option<GateDecision>, DashboardError> {
        let decisions = self
            .list_with(&GateFilter::latest(pair.clone()), retry)
            .await?;
        Ok(decisions.into_iter().next())
    }
}
