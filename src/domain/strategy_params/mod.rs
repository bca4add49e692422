//! Strategy parameter domain: per-strategy profiles of tunable numbers.
//!
//! Each strategy has three profiles. One is active; switching or editing a
//! profile queues a `RELOAD_PARAMS` command on the backend.

pub mod client;
pub mod validate;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

pub use validate::validate_params;

/// Parameter name to value.
pub type ParamSet = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    EmaVwap,
    VwapRsi,
    BbBreakout,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::EmaVwap, Strategy::VwapRsi, Strategy::BbBreakout];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::EmaVwap => "ema_vwap",
            Strategy::VwapRsi => "vwap_rsi",
            Strategy::BbBreakout => "bb_breakout",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ValidationErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| {
                ValidationErrors::single("strategy_name", format!("Unknown strategy '{}'", s))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Conservative,
    Normal,
    Aggressive,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Conservative, Profile::Normal, Profile::Aggressive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Conservative => "conservative",
            Profile::Normal => "normal",
            Profile::Aggressive => "aggressive",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ValidationErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|profile| profile.as_str() == s)
            .ok_or_else(|| ValidationErrors::single("profile", format!("Unknown profile '{}'", s)))
    }
}

/// `GET /strategy-params/{strategy}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParamsSnapshot {
    pub strategy_name: String,
    pub active_profile: String,
    #[serde(default)]
    pub profiles: BTreeMap<String, ParamSet>,
}

impl StrategyParamsSnapshot {
    /// Parameters of the active profile.
    pub fn active(&self) -> Option<&ParamSet> {
        self.profiles.get(&self.active_profile)
    }
}

/// `PUT /strategy-params/{strategy}/{profile}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamsUpdated {
    pub strategy_name: String,
    pub profile: String,
    #[serde(default)]
    pub updated_keys: Vec<String>,
    pub reload_command_id: i64,
}

/// `POST /strategy-params/{strategy}/active-profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveProfileChanged {
    pub strategy_name: String,
    pub active_profile: String,
    #[serde(default)]
    pub available_profiles: Vec<String>,
    pub reload_command_id: i64,
}

/// `POST /strategy-params/reload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReloadQueued {
    pub command_id: i64,
    #[serde(rename = "type")]
    pub command_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_and_profile_parse() {
        assert_eq!("vwap_rsi".parse::<Strategy>().unwrap(), Strategy::VwapRsi);
        assert_eq!("aggressive".parse::<Profile>().unwrap(), Profile::Aggressive);

        let err = "momentum".parse::<Strategy>().unwrap_err();
        assert_eq!(err.first_message(), "Unknown strategy 'momentum'");
        let err = "yolo".parse::<Profile>().unwrap_err();
        assert_eq!(err.errors()[0].field, "profile");
    }

    #[test]
    fn test_snapshot_active_profile() {
        let snapshot: StrategyParamsSnapshot = serde_json::from_str(
            r#"{"strategy_name":"ema_vwap","active_profile":"normal",
                "profiles":{"normal":{"vwap_atr_tolerance":0.25},"aggressive":{"vwap_atr_tolerance":0.4}}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.active().unwrap()["vwap_atr_tolerance"], 0.25);
    }
}
