//! Network defaults for the Scalp Bot API.

use std::time::Duration;

/// Default REST API base URL (local backend).
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default refresh interval for polled views.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Name of the HTTP-only session cookie the backend sets on login. The
/// transport's cookie jar replays it; the client itself never reads it.
pub const SESSION_COOKIE_NAME: &str = "sb_auth";
