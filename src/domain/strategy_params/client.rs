//! Strategy params sub-client. Admin-only on the backend.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::DashboardClient;
use crate::domain::strategy_params::{
    validate_params, ActiveProfileChanged, ParamSet, ParamsUpdated, Profile, ReloadQueued,
    Strategy, StrategyParamsSnapshot,
};
use crate::error::DashboardError;
use crate::http::RetryPolicy;

#[derive(Serialize)]
struct UpdateBody<'a> {
    params: &'a ParamSet,
}

#[derive(Serialize)]
struct ProfileBody {
    profile: Profile,
}

pub struct StrategyParams<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> StrategyParams<'a> {
    pub async fn get(&self, strategy: Strategy) -> Result<StrategyParamsSnapshot, DashboardError> {
        let path = format!("/strategy-params/{}", urlencoding::encode(strategy.as_str()));
        Ok(self.client.http.get(&path, RetryPolicy::None).await?)
    }

    /// Validate locally, then replace the parameters of one profile.
    pub async fn update(
        &self,
        strategy: Strategy,
        profile: Profile,
        params: &Map<String, Value>,
    ) -> Result<ParamsUpdated, DashboardError> {
        let params = validate_params(strategy, params)?;
        let path = format!(
            "/strategy-params/{}/{}",
            urlencoding::encode(strategy.as_str()),
            urlencoding::encode(profile.as_str())
        );
        let updated: ParamsUpdated = self
            .client
            .http
            .put(&path, &UpdateBody { params: &params }, RetryPolicy::None)
            .await?;
        tracing::info!(
            %strategy,
            %profile,
            reload_command_id = updated.reload_command_id,
            "strategy params updated"
        );
        Ok(updated)
    }

    pub async fn set_active_profile(
        &self,
        strategy: Strategy,
        profile: Profile,
    ) -> Result<ActiveProfileChanged, DashboardError> {
        let path = format!(
            "/strategy-params/{}/active-profile",
            urlencoding::encode(strategy.as_str())
        );
        let changed: ActiveProfileChanged = self
            .client
            .http
            .post(&path, &ProfileBody { profile }, RetryPolicy::None)
            .await?;
        tracing::info!(%strategy, %profile, "active profile switched");
        Ok(changed)
    }

    /// Queue a `RELOAD_PARAMS` command without changing any parameters.
    pub async fn reload(&self) -> Result<ReloadQueued, DashboardError> {
        Ok(self
            .client
            .http
            .post_empty("/strategy-params/reload", RetryPolicy::None)
            .await?)
    }
}
