//! Status sub-client.

use crate::client::DashboardClient;
use crate::domain::status::Status;
use crate::error::DashboardError;
use crate::http::RetryPolicy;

pub struct StatusClient<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> StatusClient<'a> {
    /// Uses the client's poll retry policy.
    pub async fn get(&self) -> Result<Status, DashboardError> {
        self.get_with(self.client.poll_retry.clone()).await
    }

    pub async fn get_with(&self, retry: RetryPolicy) -> Result<Status, DashboardError> {
        Ok(self.client.http.get("/status", retry).await?)
    }
}
