//! Authentication: credentials, login/logout, session state, role resolution.
//!
//! ## Security Model
//!
//! - The session credential is an HTTP-only cookie set by `POST /auth/login`.
//!   Native builds keep it in the transport's cookie store; browsers keep it
//!   themselves. Application code never reads, stores, or exposes it.
//! - Role is **inferred**, never asserted: `client.auth().resolve_role()`
//!   probes an admin-only resource and reads the outcome. The `role` field
//!   the backend echoes on login is deliberately not deserialized.
//! - Logout is best-effort: the client always drops to `Unauthenticated`, the
//!   backend owns revocation.

pub mod client;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationErrors};
use crate::view::Route;

// ============================================================================
// Role + session state
// ============================================================================

/// Operator permission level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Viewer => "viewer",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client-side session state machine.
///
/// ```text
/// Unauthenticated ──login──▶ Authenticated { role: None }
///                              │ resolve_role
///                              ▼
///                  Authenticated { role: Some(_) }
/// Authenticated ──logout | 401 at the role probe──▶ Unauthenticated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    /// The backend accepted credentials. `role` is `None` until the first probe.
    Authenticated { role: Option<Role> },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Authenticated { role } => *role,
            Self::Unauthenticated => None,
        }
    }
}

/// Outcome of the privileged probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleResolution {
    Resolved(Role),
    /// The session is dead; the UI must go to the login view.
    RedirectToLogin,
}

impl RoleResolution {
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Resolved(role) => Some(*role),
            Self::RedirectToLogin => None,
        }
    }

    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::Resolved(_) => None,
            Self::RedirectToLogin => Some(Route::Login),
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Login request body sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Local checks, run before any network call.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        if self.username.is_empty() {
            errors.push(FieldError::new("username", "Username is required"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Login response. Only the username is read; see the module docs on roles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation_empty_username() {
        let err = LoginRequest::new("", "x").validate().unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].field, "username");
        assert_eq!(err.first_message(), "Username is required");
    }

    #[test]
    fn test_login_validation_empty_password() {
        let err = LoginRequest::new("x", "").validate().unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].field, "password");
        assert_eq!(err.first_message(), "Password is required");
    }

    #[test]
    fn test_login_validation_both_empty_reports_both() {
        let err = LoginRequest::new("", "").validate().unwrap_err();
        assert!(err.for_field("username").is_some());
        assert!(err.for_field("password").is_some());
    }

    #[test]
    fn test_login_validation_passes() {
        assert!(LoginRequest::new("a", "b").validate().is_ok());
    }

    #[test]
    fn test_login_response_ignores_role_claim() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"username":"admin","role":"admin"}"#).unwrap();
        assert_eq!(resp.username.as_deref(), Some("admin"));
    }

    #[test]
    fn test_session_state_role() {
        assert_eq!(SessionState::default().role(), None);
        assert!(!SessionState::default().is_authenticated());
        let s = SessionState::Authenticated {
            role: Some(Role::Viewer),
        };
        assert!(s.is_authenticated());
        assert_eq!(s.role(), Some(Role::Viewer));
    }
}
