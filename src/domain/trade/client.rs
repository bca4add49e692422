//! Trades sub-client: ledger pages and the XLSX export.

use crate::client::DashboardClient;
use crate::domain::trade::{TradeFilter, TradePage, TradeQuery, TradeQueryParams};
use crate::error::{DashboardError, HttpError};
use crate::http::{with_query, Blob, RetryPolicy};

pub const EXPORT_PATH: &str = "/exports/trades.xlsx";

pub struct Trades<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Trades<'a> {
    /// Fetch one page of the ledger.
    pub async fn list(&self, query: &TradeQuery) -> Result<TradePage, DashboardError> {
        let path = with_query("/trades", &TradeQueryParams::from(query))?;
        let page: Option<TradePage> = self.client.http.get(&path, RetryPolicy::None).await?;
        Ok(page.unwrap_or_default())
    }

    /// Download the spreadsheet for `filter`. The bytes are opaque to the client.
    pub async fn export(&self, filter: &TradeFilter) -> Result<Blob, DashboardError> {
        let query = serde_urlencoded::to_string(filter).map_err(HttpError::from)?;
        let blob = self.client.http.download_blob(EXPORT_PATH, &query).await?;
        tracing::debug!(
            bytes = blob.bytes.len(),
            filename = blob.filename.as_deref().unwrap_or("-"),
            "trade export downloaded"
        );
        Ok(blob)
    }
}
