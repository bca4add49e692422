//! Low-level HTTP client: `DashboardHttp`.
//!
//! Attaches the session credential, declares JSON, and normalizes every
//! non-success response into [`ApiError`]. Sub-clients in `domain/*/client.rs`
//! sit on top of the typed `get`/`post`/`put` helpers.

use crate::error::{ApiBody, ApiError, HttpError};
use crate::http::retry::RetryPolicy;

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// A binary download (e.g. the XLSX trade export).
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// Suggested filename from `Content-Disposition`, if present.
    pub filename: Option<String>,
}

/// Low-level HTTP client for the Scalp Bot REST API.
///
/// The session credential is an HTTP-only cookie. On native targets it lives
/// in reqwest's cookie store; on WASM the browser keeps it. Neither path
/// exposes it to application code.
#[derive(Clone)]
pub struct DashboardHttp {
    base_url: String,
    client: Client,
}

impl DashboardHttp {
    pub fn new(base_url: &str) -> Self {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .cookie_store(true)
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── Typed helpers ────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let body = self
            .request_with_retry(Method::GET, path, None::<&()>, retry)
            .await?;
        decode(body)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let body = self
            .request_with_retry(Method::POST, path, Some(body), retry)
            .await?;
        decode(body)
    }

    /// POST without a request body (logout, reload).
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let body = self
            .request_with_retry(Method::POST, path, None::<&()>, retry)
            .await?;
        decode(body)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let body = self
            .request_with_retry(Method::PUT, path, Some(body), retry)
            .await?;
        decode(body)
    }

    // ── Raw request ──────────────────────────────────────────────────────

    /// Single attempt. Returns the body as JSON or text depending on the
    /// response content type.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiBody, HttpError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");

        let mut req = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        #[cfg(target_arch = "wasm32")]
        {
            req = req.fetch_credentials_include();
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "transport failure");
            HttpError::Transport(e)
        })?;
        let status = resp.status();
        let body = read_body(resp).await?;

        if status.is_success() {
            return Ok(body);
        }

        tracing::warn!(%method, %url, status = status.as_u16(), "api rejected request");
        Err(HttpError::Api(ApiError::new(status.as_u16(), body)))
    }

    /// Download a binary resource. Bypasses JSON parsing on success.
    pub async fn download_blob(&self, path: &str, query: &str) -> Result<Blob, HttpError> {
        let url = if query.is_empty() {
            self.url(path)
        } else {
            format!("{}?{}", self.url(path), query)
        };
        tracing::debug!(%url, "api download");

        #[allow(unused_mut)]
        let mut req = self.client.get(&url);
        #[cfg(target_arch = "wasm32")]
        {
            req = req.fetch_credentials_include();
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = read_body(resp).await?;
            tracing::warn!(%url, status = status.as_u16(), "download rejected");
            return Err(HttpError::Api(ApiError::new(status.as_u16(), body)));
        }

        let content_type = header_str(&resp, CONTENT_TYPE);
        let filename = header_str(&resp, CONTENT_DISPOSITION)
            .as_deref()
            .and_then(filename_from_disposition);
        let bytes = resp.bytes().await?.to_vec();

        Ok(Blob {
            bytes,
            content_type,
            filename,
        })
    }

    async fn request_with_retry<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<ApiBody, HttpError> {
        let Some(config) = retry.config().filter(|c| c.max_retries > 0) else {
            return self.request(method, path, body).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.request(method.clone(), path, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) if !config.should_retry(&e) => return Err(e),
                Err(e) => {
                    if attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            path
                        );
                        futures_timer::Delay::new(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        tracing::warn!(path, attempts = config.max_retries + 1, "retries exhausted");
        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }
}

fn header_str(resp: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn read_body(resp: Response) -> Result<ApiBody, HttpError> {
    let is_json = header_str(&resp, CONTENT_TYPE)
        .map(|t| t.contains("application/json"))
        .unwrap_or(false);
    let text = resp.text().await?;

    if text.is_empty() {
        return Ok(ApiBody::Empty);
    }
    if is_json {
        if let Ok(v) = serde_json::from_str(&text) {
            return Ok(ApiBody::Json(v));
        }
    }
    Ok(ApiBody::Text(text))
}

/// Convert a success body into the caller's type.
pub(crate) fn decode<T: DeserializeOwned>(body: ApiBody) -> Result<T, HttpError> {
    let value = match body {
        ApiBody::Json(v) => v,
        ApiBody::Empty => serde_json::Value::Null,
        ApiBody::Text(t) => serde_json::from_str(&t)
            .map_err(|_| HttpError::Decode(format!("expected JSON, got text: {}", t)))?,
    };
    serde_json::from_value(value).map_err(|e| HttpError::Decode(e.to_string()))
}

/// Append a URL-encoded query built from `params` to `path`.
///
/// `None` fields are skipped by the filter types, so an empty filter yields
/// the bare path.
pub fn with_query<Q: Serialize>(path: &str, params: &Q) -> Result<String, HttpError> {
    let query = serde_urlencoded::to_string(params)?;
    if query.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, query))
    }
}

/// Extract `filename` from a `Content-Disposition` header value.
pub fn filename_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = DashboardHttp::new("http://127.0.0.1:8000/");
        assert_eq!(http.base_url(), "http://127.0.0.1:8000");
        assert_eq!(http.url("/status"), "http://127.0.0.1:8000/status");
    }

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="trades.xlsx""#).as_deref(),
            Some("trades.xlsx")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=report.csv").as_deref(),
            Some("report.csv")
        );
        assert_eq!(filename_from_disposition("inline"), None);
    }

    #[test]
    fn test_with_query_skips_empty() {
        #[derive(Serialize)]
        struct Q {
            #[serde(skip_serializing_if = "Option::is_none")]
            pair: Option<&'static str>,
        }
        assert_eq!(with_query("/gates", &Q { pair: None }).unwrap(), "/gates");
        assert_eq!(
            with_query("/gates", &Q { pair: Some("EUR_USD") }).unwrap(),
            "/gates?pair=EUR_USD"
        );
    }

    #[test]
    fn test_decode_json_and_empty() {
        let v: serde_json::Value = decode(ApiBody::Json(serde_json::json!({"ok": true}))).unwrap();
        assert_eq!(v["ok"], true);
        let none: Option<u32> = decode(ApiBody::Empty).unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn test_decode_rejects_non_json_text() {
        let err = decode::<serde_json::Value>(ApiBody::Text("not mocked".into())).unwrap_err();
        assert!(matches!(err, HttpError::Decode(_)));
    }
}
