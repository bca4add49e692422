//! Local validation for settings edits.
//!
//! Only a known subset of keys is range-checked; everything else passes
//! through unchanged.

use serde_json::Value;

use crate::domain::settings::Settings;
use crate::error::{FieldError, ValidationErrors};

struct Bounds {
    key: &'static str,
    min: f64,
    max: f64,
    integer: bool,
}

const KNOWN_KEYS: [Bounds; 3] = [
    Bounds {
        key: "risk_pct",
        min: 0.0,
        max: 0.1,
        integer: false,
    },
    Bounds {
        key: "default_units",
        min: 1.0,
        max: 1_000_000.0,
        integer: true,
    },
    Bounds {
        key: "command_poll_interval_sec",
        min: 0.1,
        max: 60.0,
        integer: false,
    },
];

/// Validate an edited settings document.
///
/// The document must be a JSON object. Known keys are optional but, when
/// present, must be numbers within range (`default_units` must be whole).
pub fn validate_settings(value: Value) -> Result<Settings, ValidationErrors> {
    let Value::Object(map) = value else {
        return Err(ValidationErrors::single("settings", "Expected a JSON object"));
    };

    let errors: Vec<FieldError> = KNOWN_KEYS
        .iter()
        .filter_map(|bounds| check(bounds, map.get(bounds.key)?))
        .collect();

    if errors.is_empty() {
        Ok(Settings::new(map))
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Parse edited settings text, then validate it.
pub fn parse_settings(text: &str) -> Result<Settings, ValidationErrors> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ValidationErrors::single("settings", format!("Invalid JSON: {}", e)))?;
    validate_settings(value)
}

fn check(bounds: &Bounds, value: &Value) -> Option<FieldError> {
    let Some(number) = value.as_f64() else {
        return Some(FieldError::new(bounds.key, "Expected number"));
    };
    if bounds.integer && number.fract() != 0.0 {
        return Some(FieldError::new(bounds.key, "Expected integer"));
    }
    if number < bounds.min {
        return Some(FieldError::new(
            bounds.key,
            format!("Number must be greater than or equal to {}", bounds.min),
        ));
    }
    if number > bounds.max {
        return Some(FieldError::new(
            bounds.key,
            format!("Number must be less than or equal to {}", bounds.max),
        ));
    }
    None
}
