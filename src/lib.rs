//! # scalp-dashboard
//!
//! Operator client for the Scalp Bot trading backend: login and role
//! resolution, polled views over status, gates, positions and trades, and
//! fire-and-forget control commands.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Shared newtypes, formatting, domain models per vertical slice
//! 2. **HTTP API**: `DashboardHttp` with caller-selected retry policies
//! 3. **Auth**: Login validation, session state, probe-based role resolution
//! 4. **Query**: Generation-guarded result slots, poll ticks, per-pair gate board
//! 5. **High-Level Client**: `DashboardClient` with nested sub-clients
//! 6. **Views**: Route gating and view models for a front-end to render
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scalp_dashboard::prelude::*;
//!
//! let client = DashboardClient::builder()
//!     .base_url("http://127.0.0.1:8000")
//!     .build()?;
//!
//! client.auth().login("admin", "secret").await?;
//! if let RouteGate::Enter(role) = gate_route(&client, Route::Overview).await? {
//!     let mut overview = OverviewView::new(&client, role);
//!     overview.refresh().await;
//!     for card in overview.pair_cards().await {
//!         println!("{} {} {}", card.pair, card.status, card.reason);
//!     }
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and formatting helpers.
pub mod shared;

/// Domain modules (vertical slices): types, validation, sub-clients, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Default endpoint and polling constants.
pub mod network;

/// Environment-driven configuration.
pub mod config;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
pub mod http;

// ── Layer 3: Auth ────────────────────────────────────────────────────────────

/// Login/logout, session state, role resolution.
pub mod auth;

// ── Layer 4: Query ───────────────────────────────────────────────────────────

/// Result slots with stale-result suppression and polling.
pub mod query;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `DashboardClient`: the primary entry point.
pub mod client;

// ── Layer 6: Views ───────────────────────────────────────────────────────────

/// Route gating and view models.
pub mod view;

/// Log subscriber setup for binaries.
#[cfg(feature = "cli")]
pub mod logging;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes + formatting
    pub use crate::shared::fmt::{badge_variant, format_pips, format_utc, BadgeVariant};
    pub use crate::shared::{Pair, Side, TradingMode};

    // Domain types
    pub use crate::domain::audit::{AuditEntry, AuditFilter, AuditView};
    pub use crate::domain::command::{Command, CommandAck, CommandOutcome, CommandType};
    pub use crate::domain::gate::{GateBadge, GateDecision, GateFilter, GateStatus};
    pub use crate::domain::position::{Position, PositionFilter, PositionStatus};
    pub use crate::domain::settings::Settings;
    pub use crate::domain::status::Status;
    pub use crate::domain::strategy_params::{Profile, Strategy, StrategyParamsSnapshot};
    pub use crate::domain::trade::{Trade, TradeFilter, TradeLedger, TradePage, TradeQuery};

    // Errors
    pub use crate::error::{DashboardError, FieldError, HttpError, ValidationErrors};

    // Config + network
    pub use crate::config::DashboardConfig;
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_POLL_INTERVAL};

    // Auth
    pub use crate::auth::{Role, RoleResolution, SessionState};

    // HTTP client + sub-clients
    pub use crate::client::{
        AuditClient, AuthClient, CommandsClient, DashboardClient, DashboardClientBuilder,
        GatesClient, PositionsClient, StrategyParamsClient, TradesClient,
    };
    pub use crate::http::{Blob, RetryConfig, RetryPolicy};

    // Query layer
    pub use crate::query::{GateBoard, QueryError, QueryOptions, QuerySlot, QueryState};

    // Views
    pub use crate::view::{
        gate_route, navigation, AuditLog, OverviewView, PairCard, PositionsView, Route,
        RouteGate, SaveResult, SettingsView, TradesView,
    };
}
