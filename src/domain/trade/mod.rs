//! Trade domain: the paginated trade ledger and its spreadsheet export.

pub mod client;
pub mod state;

use serde::{Deserialize, Serialize};

use crate::shared::{Pair, Side, TradingMode};

pub use state::TradeLedger;

/// A ledger row from `GET /trades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub pair: Pair,
    pub side: String,
    #[serde(default)]
    pub opened_ts_utc: Option<String>,
    #[serde(default)]
    pub closed_ts_utc: Option<String>,
    #[serde(default)]
    pub units: Option<f64>,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub exit_price: Option<f64>,
    /// Realized result in pips, once closed.
    #[serde(default)]
    pub result: Option<f64>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub position_id: Option<i64>,
    #[serde(default)]
    pub command_id: Option<i64>,
}

impl Trade {
    pub fn side(&self) -> Option<Side> {
        self.side.parse().ok()
    }
}

/// One page of the ledger. `next_cursor` is `None` on the last page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradePage {
    #[serde(default)]
    pub items: Vec<Trade>,
    #[serde(default)]
    pub next_cursor: Option<i64>,
}

/// Filters shared by `GET /trades` and `GET /exports/trades.xlsx`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TradeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<Pair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TradingMode>,
    /// Originating command id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_id: Option<i64>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Query key for one ledger page: the filter set plus the pagination cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TradeQuery {
    pub filter: TradeFilter,
    pub cursor: Option<i64>,
}

impl TradeQuery {
    pub fn first_page(filter: TradeFilter) -> Self {
        Self {
            filter,
            cursor: None,
        }
    }
}

/// Wire form of a [`TradeQuery`].
#[derive(Serialize)]
struct TradeQueryParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pair: Option<&'a Pair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_ts: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_ts: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<TradingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl<'a> From<&'a TradeQuery> for TradeQueryParams<'a> {
    fn from(q: &'a TradeQuery) -> Self {
        let f = &q.filter;
        Self {
            pair: f.pair.as_ref(),
            from_ts: f.from_ts.as_deref(),
            to_ts: f.to_ts.as_deref(),
            side: f.side,
            mode: f.mode,
            command_id: f.command_id,
            cursor: q.cursor,
            limit: f.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes() {
        let page: TradePage = serde_json::from_str(
            r#"{"items":[{"id":1,"pair":"EUR_USD","side":"BUY","opened_ts_utc":"2025-01-01T00:00:00+00:00"}],
                "next_cursor":null}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].side(), Some(Side::Buy));
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_query_params_include_cursor() {
        let query = TradeQuery {
            filter: TradeFilter {
                pair: Some(Pair::from("EUR_USD")),
                side: Some(Side::Sell),
                mode: Some(TradingMode::Paper),
                command_id: Some(7),
                limit: Some(50),
                ..Default::default()
            },
            cursor: Some(120),
        };
        let encoded = serde_urlencoded::to_string(TradeQueryParams::from(&query)).unwrap();
        assert_eq!(
            encoded,
            "pair=EUR_USD&side=SELL&mode=PAPER&command_id=7&cursor=120&limit=50"
        );
    }

    #[test]
    fn test_filter_encodes_timestamps() {
        let filter = TradeFilter {
            from_ts: Some("2025-01-01T00:00:00Z".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_urlencoded::to_string(&filter).unwrap(),
            "from_ts=2025-01-01T00%3A00%3A00Z"
        );
    }
}
