//! Settings domain: the backend's raw key/value configuration and the
//! tracked-pair projection derived from it.

pub mod client;
pub mod validate;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::Pair;

pub use validate::validate_settings;

/// Keys that may hold the tracked-pair list, in priority order.
pub const PAIR_LIST_KEYS: [&str; 4] = ["pairs", "watchlist", "symbols", "instruments"];

/// Settings as returned by `GET /settings`. Unknown keys are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Settings {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tracked pairs, recomputed on every call.
    ///
    /// The first key of [`PAIR_LIST_KEYS`] holding an array with at least one
    /// non-empty string wins; non-string and empty entries are dropped.
    pub fn tracked_pairs(&self) -> Vec<Pair> {
        PAIR_LIST_KEYS
            .iter()
            .filter_map(|key| self.0.get(*key)?.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(Pair::from)
                    .collect::<Vec<_>>()
            })
            .find(|pairs| !pairs.is_empty())
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(v: Value) -> Settings {
        serde_json::from_value(v).unwrap()
    }

    fn names(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|p| p.as_str().to_string()).collect()
    }

    #[test]
    fn test_pairs_key_wins() {
        let s = settings(json!({"pairs": ["EUR_USD"], "watchlist": ["GBP_USD"]}));
        assert_eq!(names(s.tracked_pairs()), ["EUR_USD"]);
    }

    #[test]
    fn test_priority_skips_empty_arrays() {
        let s = settings(json!({"pairs": [], "watchlist": [], "symbols": ["USD_JPY", "AUD_USD"]}));
        assert_eq!(names(s.tracked_pairs()), ["USD_JPY", "AUD_USD"]);
    }

    #[test]
    fn test_non_string_entries_dropped() {
        let s = settings(json!({"watchlist": ["EUR_USD", 3, null, "", {"x": 1}, "GBP_USD"]}));
        assert_eq!(names(s.tracked_pairs()), ["EUR_USD", "GBP_USD"]);
    }

    #[test]
    fn test_array_without_strings_falls_through() {
        let s = settings(json!({"pairs": [1, 2], "instruments": ["XAU_USD"]}));
        assert_eq!(names(s.tracked_pairs()), ["XAU_USD"]);
    }

    #[test]
    fn test_non_array_values_ignored() {
        let s = settings(json!({"pairs": "EUR_USD", "symbols": {"a": "b"}}));
        assert!(s.tracked_pairs().is_empty());
    }

    #[test]
    fn test_no_candidate_keys() {
        let s = settings(json!({"risk_pct": 0.01}));
        assert!(s.tracked_pairs().is_empty());
    }

    #[test]
    fn test_unknown_keys_round_trip() {
        let raw = json!({"pairs": ["EUR_USD"], "custom": {"nested": [1, 2, 3]}});
        let s = settings(raw.clone());
        assert_eq!(serde_json::to_value(&s).unwrap(), raw);
    }
}
