//! Views: route gating and the view models a front-end renders.
//!
//! Every protected route is entered through [`gate_route`], which runs the
//! role probe first. Views own their query slots; the front-end drives their
//! refresh methods (typically from [`crate::query::poll::ticks`]) and reads
//! the derived state back.

pub mod audit;
pub mod overview;
pub mod positions;
pub mod settings;
pub mod trades;

use crate::auth::{Role, RoleResolution};
use crate::client::DashboardClient;
use crate::error::DashboardError;

pub use audit::AuditLog;
pub use overview::{OverviewView, PairCard};
pub use positions::PositionsView;
pub use settings::{SaveResult, SettingsView};
pub use trades::TradesView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Overview,
    Trades,
    Positions,
    Audit,
    Settings,
}

impl Route {
    /// Sidebar order.
    pub const NAVIGATION: [Route; 5] = [
        Route::Overview,
        Route::Trades,
        Route::Positions,
        Route::Audit,
        Route::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Overview => "/",
            Route::Trades => "/trades",
            Route::Positions => "/positions",
            Route::Audit => "/audit",
            Route::Settings => "/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Overview => "Overview",
            Route::Trades => "Trades",
            Route::Positions => "Positions",
            Route::Audit => "Audit",
            Route::Settings => "Settings",
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn admin_only(&self) -> bool {
        matches!(self, Route::Settings)
    }

    pub fn allows(&self, role: Role) -> bool {
        !self.admin_only() || role.is_admin()
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Sidebar routes visible to `role`.
pub fn navigation(role: Role) -> Vec<Route> {
    Route::NAVIGATION
        .into_iter()
        .filter(|route| route.allows(role))
        .collect()
}

/// Outcome of entering a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGate {
    /// The login route needs no session.
    Public,
    Enter(Role),
    Redirect(Route),
}

/// Resolve the operator's role and decide whether `route` may be shown.
///
/// A dead session redirects to [`Route::Login`]; a viewer asking for an
/// admin-only route is sent to [`Route::Overview`].
pub async fn gate_route(client: &DashboardClient, route: Route) -> Result<RouteGate, DashboardError> {
    if !route.is_protected() {
        return Ok(RouteGate::Public);
    }

    let gate = match client.auth().resolve_role().await? {
        RoleResolution::RedirectToLogin => RouteGate::Redirect(Route::Login),
        RoleResolution::Resolved(role) if route.allows(role) => RouteGate::Enter(role),
        RoleResolution::Resolved(role) => {
            tracing::debug!(%role, route = %route, "route not permitted, redirecting");
            RouteGate::Redirect(Route::Overview)
        }
    };
    Ok(gate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_is_admin_only() {
        assert!(Route::Settings.admin_only());
        assert!(!Route::Overview.admin_only());
        assert!(!Route::Settings.allows(Role::Viewer));
        assert!(Route::Settings.allows(Role::Admin));
    }

    #[test]
    fn test_navigation_per_role() {
        assert_eq!(
            navigation(Role::Viewer),
            vec![Route::Overview, Route::Trades, Route::Positions, Route::Audit]
        );
        assert_eq!(navigation(Role::Admin).last(), Some(&Route::Settings));
    }

    #[test]
    fn test_login_route_is_public() {
        let client = DashboardClient::builder().build().unwrap();
        let gate = tokio_test::block_on(gate_route(&client, Route::Login)).unwrap();
        assert_eq!(gate, RouteGate::Public);
    }
}
