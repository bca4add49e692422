//! Unified dashboard error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level dashboard client error.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl DashboardError {
    /// Status code of the backend rejection behind this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            DashboardError::Http(e) => e.status(),
            DashboardError::Auth(AuthError::LoginFailed { status }) => *status,
            _ => None,
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    /// No response was received (connection refused, DNS, TLS, ...).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Query encoding failed: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Api(e) => Some(e.status),
            _ => None,
        }
    }

    pub fn api(&self) -> Option<&ApiError> {
        match self {
            HttpError::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Response body as returned by the backend, chosen by content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(serde_json::Value),
    Text(String),
    Empty,
}

impl ApiBody {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ApiBody::Json(v) => Some(v),
            _ => None,
        }
    }

    /// FastAPI-style `detail` field, when the body carries one.
    pub fn detail(&self) -> Option<String> {
        match self.as_json()?.get("detail")? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiBody::Json(v) => write!(f, "{}", v),
            ApiBody::Text(t) => write!(f, "{}", t),
            ApiBody::Empty => Ok(()),
        }
    }
}

/// A non-success response from the backend.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("API Error {status}")]
pub struct ApiError {
    pub status: u16,
    pub body: ApiBody,
}

impl ApiError {
    pub fn new(status: u16, body: ApiBody) -> Self {
        Self { status, body }
    }

    /// Field errors from a `{"detail": {"errors": [...]}}` rejection body.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.body
            .as_json()
            .and_then(|v| v.get("detail")?.get("errors"))
            .and_then(|errors| serde_json::from_value(errors.clone()).ok())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self.status {
            401 => ApiErrorKind::Unauthenticated,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            400..=499 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Server,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Unauthenticated,
    Forbidden,
    NotFound,
    Validation,
    Server,
}

/// Authentication errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("{}", login_failed_message(.status))]
    LoginFailed { status: Option<u16> },
}

fn login_failed_message(status: &Option<u16>) -> String {
    match status {
        Some(s) => format!("Login failed ({})", s),
        None => "Login failed".to_string(),
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn first_message_of(errors: &[FieldError]) -> &str {
    errors
        .first()
        .map(|e| e.message.as_str())
        .unwrap_or("Invalid input")
}

/// Local validation failures. Never produced by a network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", first_message_of(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn first_message(&self) -> &str {
        first_message_of(&self.0)
    }

    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_kind_classification() {
        assert_eq!(ApiError::new(401, ApiBody::Empty).kind(), ApiErrorKind::Unauthenticated);
        assert_eq!(ApiError::new(403, ApiBody::Empty).kind(), ApiErrorKind::Forbidden);
        assert_eq!(ApiError::new(404, ApiBody::Empty).kind(), ApiErrorKind::NotFound);
        assert_eq!(ApiError::new(422, ApiBody::Empty).kind(), ApiErrorKind::Validation);
        assert_eq!(ApiError::new(503, ApiBody::Empty).kind(), ApiErrorKind::Server);
    }

    #[test]
    fn test_api_body_detail() {
        let body = ApiBody::Json(serde_json::json!({"detail": "Admin role required"}));
        assert_eq!(body.detail().as_deref(), Some("Admin role required"));
        assert_eq!(ApiBody::Text("oops".into()).detail(), None);
    }

    #[test]
    fn test_api_error_field_errors() {
        let body = ApiBody::Json(serde_json::json!({
            "detail": {"errors": [{"field": "rsi_period", "message": "Must be between 1.0 and 100.0"}]}
        }));
        let errors = ApiError::new(400, body).field_errors();
        assert_eq!(errors, vec![FieldError::new("rsi_period", "Must be between 1.0 and 100.0")]);
        assert!(ApiError::new(400, ApiBody::Empty).field_errors().is_empty());
    }

    #[test]
    fn test_login_failed_message_includes_status() {
        let err = AuthError::LoginFailed { status: Some(401) };
        assert_eq!(err.to_string(), "Login failed (401)");
        let err = AuthError::LoginFailed { status: None };
        assert_eq!(err.to_string(), "Login failed");
    }

    #[test]
    fn test_validation_errors_first_message() {
        let errs = ValidationErrors(vec![
            FieldError::new("username", "Username is required"),
            FieldError::new("password", "Password is required"),
        ]);
        assert_eq!(errs.to_string(), "Username is required");
        assert!(errs.for_field("password").is_some());
    }
}
