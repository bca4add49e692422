//! Auth sub-client: login, logout, role resolution, session state.

use reqwest::Method;

use crate::auth::{LoginRequest, LoginResponse, Role, RoleResolution, SessionState};
use crate::client::DashboardClient;
use crate::error::{AuthError, DashboardError, HttpError};
use crate::http::RetryPolicy;
use crate::view::Route;

/// Admin-only resource used as the privileged probe.
pub const ROLE_PROBE_PATH: &str = "/settings";

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Auth<'a> {
    /// Validate locally, submit credentials, and return the route to show next.
    ///
    /// Empty fields fail with a field-level [`ValidationErrors`](crate::error::ValidationErrors)
    /// before any request is made. A backend rejection becomes
    /// [`AuthError::LoginFailed`] carrying the status code.
    pub async fn login(&self, username: &str, password: &str) -> Result<Route, DashboardError> {
        let request = LoginRequest::new(username, password);
        request.validate()?;

        let resp: Option<LoginResponse> = self
            .client
            .http
            .post("/auth/login", &request, RetryPolicy::None)
            .await
            .map_err(|e| match e {
                HttpError::Api(api) => AuthError::LoginFailed {
                    status: Some(api.status),
                },
                _ => AuthError::LoginFailed { status: None },
            })?;

        *self.client.session.write().await = SessionState::Authenticated { role: None };
        tracing::info!(
            username = resp.and_then(|r| r.username).as_deref().unwrap_or(username),
            "session established"
        );

        Ok(Route::Overview)
    }

    /// Infer the operator's role from a single privileged probe.
    ///
    /// - 2xx → admin
    /// - 403 → viewer (valid session, no elevated rights)
    /// - 401 → [`RoleResolution::RedirectToLogin`]; the session is marked dead
    /// - anything else is returned as an error and no role is established
    ///
    /// Never retried.
    pub async fn resolve_role(&self) -> Result<RoleResolution, DashboardError> {
        let probe = self
            .client
            .http
            .request(Method::GET, ROLE_PROBE_PATH, None::<&()>)
            .await;

        let resolution = match probe {
            Ok(_) => RoleResolution::Resolved(Role::Admin),
            Err(e) if e.is_forbidden() => RoleResolution::Resolved(Role::Viewer),
            Err(e) if e.is_unauthenticated() => RoleResolution::RedirectToLogin,
            Err(e) => return Err(e.into()),
        };

        let mut session = self.client.session.write().await;
        *session = match resolution {
            RoleResolution::Resolved(role) => SessionState::Authenticated { role: Some(role) },
            RoleResolution::RedirectToLogin => {
                if session.is_authenticated() {
                    tracing::info!("session rejected by backend");
                }
                SessionState::Unauthenticated
            }
        };

        Ok(resolution)
    }

    /// Best-effort logout. Always ends `Unauthenticated` on the login route.
    pub async fn logout(&self) -> Route {
        if let Err(e) = self
            .client
            .http
            .post_empty::<serde_json::Value>("/auth/logout", RetryPolicy::None)
            .await
        {
            tracing::debug!(error = %e, "logout call failed, ignoring");
        }

        *self.client.session.write().await = SessionState::Unauthenticated;
        tracing::info!("session cleared");
        Route::Login
    }

    /// Current client-side session state.
    pub async fn session(&self) -> SessionState {
        *self.client.session.read().await
    }

    /// Role from the last successful probe, if any.
    pub async fn role(&self) -> Option<Role> {
        self.client.session.read().await.role()
    }

    /// Role from the last probe, or an error when no session is established.
    pub async fn require_role(&self) -> Result<Role, DashboardError> {
        self.role()
            .await
            .ok_or(DashboardError::Auth(AuthError::NotAuthenticated))
    }
}
