//! Position domain: open (or closed) positions held by the bot.

pub mod client;

use serde::{Deserialize, Serialize};

use crate::shared::{Pair, Side};

/// A position row from `GET /positions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub pair: Pair,
    /// Raw direction as sent by the backend (`BUY`/`SELL` or `LONG`/`SHORT`).
    pub side: String,
    pub units: f64,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub opened_ts_utc: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Position {
    pub fn side(&self) -> Option<Side> {
        self.side.parse().ok()
    }

    pub fn is_open(&self) -> bool {
        self.status
            .as_deref()
            .map_or(true, |s| s.eq_ignore_ascii_case("OPEN"))
    }
}

/// Lifecycle filter accepted by `GET /positions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionStatus {
    Open,
    Closed,
}

impl std::str::FromStr for PositionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(PositionStatus::Open),
            "CLOSED" => Ok(PositionStatus::Closed),
            other => Err(format!("Invalid position status: {}", other)),
        }
    }
}

/// Filter for `GET /positions`. An empty filter lists open positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PositionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PositionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<Pair>,
}
