//! Positions sub-client.

use crate::client::DashboardClient;
use crate::domain::position::{Position, PositionFilter};
use crate::error::DashboardError;
use crate::http::{with_query, RetryPolicy};

pub struct Positions<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Positions<'a> {
    /// Polled read. Uses the client's poll retry policy.
    pub async fn list(&self, filter: &PositionFilter) -> Result<Vec<Position>, DashboardError> {
        self.list_with(filter, self.client.poll_retry.clone()).await
    }

    pub async fn list_with(
        &self,
        filter: &PositionFilter,
        retry: RetryPolicy,
    ) -> Result<Vec<Position>, DashboardError> {
        let path = with_query("/positions", filter)?;
        Ok(self.client.http.get(&path, retry).await?)
    }
}
