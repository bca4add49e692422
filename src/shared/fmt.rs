//! Display formatting for timestamps, pip values and status badges.

use chrono::{DateTime, SecondsFormat, Utc};

/// Placeholder shown for missing or unparseable values.
pub const PLACEHOLDER: &str = "-";

/// Format an RFC 3339 timestamp as UTC with millisecond precision
/// (`2025-01-01T00:00:00.000Z`).
///
/// Empty or invalid input yields [`PLACEHOLDER`]. Formatting an already
/// formatted value returns it unchanged.
pub fn format_utc(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return PLACEHOLDER.to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        Err(_) => PLACEHOLDER.to_string(),
    }
}

/// `12.345` → `"12.3 pips"`; missing or NaN → [`PLACEHOLDER`].
pub fn format_pips(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{:.1} pips", v),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Colour family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Green,
    Yellow,
    Red,
    Slate,
}

impl BadgeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeVariant::Green => "green",
            BadgeVariant::Yellow => "yellow",
            BadgeVariant::Red => "red",
            BadgeVariant::Slate => "slate",
        }
    }
}

/// Map a backend status word (command status, side, gate verdict) to a badge.
pub fn badge_variant(status: &str) -> BadgeVariant {
    match status.to_ascii_uppercase().as_str() {
        "SUCCEEDED" | "OPEN" | "BUY" | "PASS" => BadgeVariant::Green,
        "PENDING" | "RUNNING" | "HOLD" | "SKIPPED" => BadgeVariant::Yellow,
        "FAILED" | "BLOCK" => BadgeVariant::Red,
        _ => BadgeVariant::Slate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_utc_normalizes_offset() {
        assert_eq!(
            format_utc(Some("2025-01-01T00:00:00+00:00")),
            "2025-01-01T00:00:00.000Z"
        );
        assert_eq!(
            format_utc(Some("2025-01-01T02:30:00+02:00")),
            "2025-01-01T00:30:00.000Z"
        );
    }

    #[test]
    fn test_format_utc_is_idempotent() {
        let once = format_utc(Some("2025-06-30T12:34:56.789Z"));
        let twice = format_utc(Some(&once));
        assert_eq!(once, "2025-06-30T12:34:56.789Z");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_utc_placeholder() {
        assert_eq!(format_utc(None), "-");
        assert_eq!(format_utc(Some("")), "-");
        assert_eq!(format_utc(Some("yesterday")), "-");
    }

    #[test]
    fn test_format_pips() {
        assert_eq!(format_pips(Some(12.345)), "12.3 pips");
        assert_eq!(format_pips(None), "-");
        assert_eq!(format_pips(Some(f64::NAN)), "-");
    }

    #[test]
    fn test_badge_variant() {
        assert_eq!(badge_variant("SUCCEEDED"), BadgeVariant::Green);
        assert_eq!(badge_variant("pending"), BadgeVariant::Yellow);
        assert_eq!(badge_variant("HOLD"), BadgeVariant::Yellow);
        assert_eq!(badge_variant("FAILED"), BadgeVariant::Red);
        assert_eq!(badge_variant("whatever"), BadgeVariant::Slate);
    }
}
