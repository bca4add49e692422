//! Local validation for strategy parameter edits.
//!
//! Mirrors the backend rules so invalid edits never leave the client.

use serde_json::{Map, Value};

use crate::domain::strategy_params::{ParamSet, Strategy};
use crate::error::{FieldError, ValidationErrors};

/// Inclusive range for each parameter of a strategy.
pub fn ranges(strategy: Strategy) -> &'static [(&'static str, f64, f64)] {
    match strategy {
        Strategy::EmaVwap => &[("vwap_atr_tolerance", 0.0, 1.0)],
        Strategy::VwapRsi => &[
            ("rsi_buy_max", 0.0, 100.0),
            ("rsi_sell_min", 0.0, 100.0),
            ("vwap_atr_tolerance", 0.0, 1.0),
            ("rsi_period", 1.0, 100.0),
        ],
        Strategy::BbBreakout => &[
            ("volume_spike_mult", 0.0, 5.0),
            ("squeeze_percentile", 0.0, 100.0),
            ("squeeze_expand_mult", 0.5, 3.0),
        ],
    }
}

/// Validate a full parameter set for `strategy`.
///
/// The keys must be exactly the strategy's parameters. Values may be JSON
/// numbers or numeric strings and are normalized to `f64`.
pub fn validate_params(
    strategy: Strategy,
    params: &Map<String, Value>,
) -> Result<ParamSet, ValidationErrors> {
    let schema = ranges(strategy);
    let mut errors = Vec::new();

    for key in params.keys() {
        if !schema.iter().any(|(name, _, _)| name == key) {
            errors.push(FieldError::new(key.as_str(), "Unknown parameter key"));
        }
    }
    for (name, _, _) in schema {
        if !params.contains_key(*name) {
            errors.push(FieldError::new(*name, "Missing required parameter"));
        }
    }

    let mut normalized = ParamSet::new();
    for (name, lower, upper) in schema {
        let Some(value) = params.get(*name) else {
            continue;
        };
        let Some(number) = as_number(value) else {
            errors.push(FieldError::new(*name, "Must be a number"));
            continue;
        };
        if number < *lower || number > *upper {
            errors.push(FieldError::new(
                *name,
                format!("Must be between {:?} and {:?}", lower, upper),
            ));
        }
        normalized.insert(name.to_string(), number);
    }

    if strategy == Strategy::VwapRsi {
        if let (Some(buy), Some(sell)) = (
            normalized.get("rsi_buy_max"),
            normalized.get("rsi_sell_min"),
        ) {
            if buy >= sell {
                errors.push(FieldError::new("rsi_buy_max", "Must be less than rsi_sell_min"));
            }
        }
    }

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Finite numbers only; `"NaN"` and `"inf"` parse as floats but are not values.
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
