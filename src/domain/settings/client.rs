//! Settings sub-client: read and update the backend configuration.

use serde::Deserialize;

use crate::client::DashboardClient;
use crate::domain::settings::{validate_settings, Settings};
use crate::error::DashboardError;
use crate::http::RetryPolicy;

/// Response from `PUT /settings`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SettingsUpdated {
    #[serde(default)]
    pub updated: Vec<String>,
}

pub struct SettingsClient<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> SettingsClient<'a> {
    /// One-shot read. Admin-only on the backend; never retried.
    pub async fn get(&self) -> Result<Settings, DashboardError> {
        Ok(self.client.http.get("/settings", RetryPolicy::None).await?)
    }

    /// Validate locally, then write. Invalid input never reaches the network.
    pub async fn update(&self, settings: Settings) -> Result<SettingsUpdated, DashboardError> {
        let validated = validate_settings(serde_json::Value::Object(settings.into_map()))?;
        let resp: Option<SettingsUpdated> = self
            .client
            .http
            .put("/settings", &validated, RetryPolicy::None)
            .await?;
        Ok(resp.unwrap_or_default())
    }
}
