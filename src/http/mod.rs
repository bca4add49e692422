//! HTTP client layer: `DashboardHttp` with caller-selected retry policies.

pub mod client;
pub mod retry;

pub use client::{with_query, Blob, DashboardHttp};
pub use retry::{RetryConfig, RetryPolicy};
