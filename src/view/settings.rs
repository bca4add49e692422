//! Settings editor. Admin only.

use crate::auth::Role;
use crate::client::DashboardClient;
use crate::domain::settings::client::SettingsUpdated;
use crate::domain::settings::validate::parse_settings;
use crate::domain::settings::Settings;
use crate::error::{DashboardError, ValidationErrors};
use crate::query::{QueryOptions, QuerySlot, QueryState};
use crate::view::Route;

/// Result of a save attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveResult {
    Saved(SettingsUpdated),
    /// Rejected locally; nothing was sent.
    ValidationFailed(ValidationErrors),
    SaveFailed { status: Option<u16>, error: String },
}

impl SaveResult {
    pub fn message(&self) -> String {
        match self {
            SaveResult::Saved(_) => "Saved".to_string(),
            SaveResult::ValidationFailed(_) => "Validation failed".to_string(),
            SaveResult::SaveFailed {
                status: Some(status),
                ..
            } => format!("Save failed ({})", status),
            SaveResult::SaveFailed { status: None, .. } => "Save failed".to_string(),
        }
    }
}

pub struct SettingsView {
    client: DashboardClient,
    settings: QuerySlot<(), Settings>,
}

impl SettingsView {
    /// Open the editor, or the route a viewer is redirected to.
    pub fn open(client: &DashboardClient, role: Role) -> Result<Self, Route> {
        if !Route::Settings.allows(role) {
            return Err(Route::Overview);
        }
        Ok(Self {
            client: client.clone(),
            settings: QuerySlot::new(&QueryOptions::one_shot()),
        })
    }

    pub async fn load(&self) {
        let client = &self.client;
        self.settings
            .fetch((), |_, _| async move { client.settings().get().await })
            .await;
    }

    pub async fn state(&self) -> QueryState<Settings> {
        self.settings.state().await
    }

    /// Pretty-printed JSON of the loaded settings, as the edit buffer.
    pub async fn draft(&self) -> Option<String> {
        let state = self.settings.state().await;
        serde_json::to_string_pretty(state.value()?).ok()
    }

    /// Validate `text` and write it. A successful save reloads the settings.
    pub async fn save(&self, text: &str) -> SaveResult {
        let settings = match parse_settings(text) {
            Ok(settings) => settings,
            Err(errors) => return SaveResult::ValidationFailed(errors),
        };

        match self.client.settings().update(settings).await {
            Ok(updated) => {
                self.load().await;
                SaveResult::Saved(updated)
            }
            Err(DashboardError::Validation(errors)) => SaveResult::ValidationFailed(errors),
            Err(e) => {
                tracing::warn!(error = %e, "settings save failed");
                SaveResult::SaveFailed {
                    status: e.status(),
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_redirected_to_overview() {
        let client = DashboardClient::builder().build().unwrap();
        assert_eq!(SettingsView::open(&client, Role::Viewer).err(), Some(Route::Overview));
        assert!(SettingsView::open(&client, Role::Admin).is_ok());
    }

    #[test]
    fn test_invalid_text_never_reaches_network() {
        let client = DashboardClient::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        let view = SettingsView::open(&client, Role::Admin).unwrap();
        let result = tokio_test::block_on(view.save(r#"{"risk_pct": -1}"#));
        assert_eq!(result.message(), "Validation failed");
        let result = tokio_test::block_on(view.save("not json"));
        assert_eq!(result.message(), "Validation failed");
    }

    #[test]
    fn test_save_failed_message() {
        let result = SaveResult::SaveFailed {
            status: Some(403),
            error: "API Error 403".into(),
        };
        assert_eq!(result.message(), "Save failed (403)");
    }
}
