//! Log subscriber for the operator CLI.

use tracing_subscriber::EnvFilter;

/// Level used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info";

/// Install a compact fmt subscriber.
///
/// `level` overrides `RUST_LOG`. An unparseable filter falls back to
/// [`DEFAULT_FILTER`]. Calling this twice is a no-op.
pub fn init(level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .compact()
        .with_env_filter(filter(level))
        .try_init();
}

/// `level`, else `RUST_LOG`, else [`DEFAULT_FILTER`]; transport noise capped at `warn`.
fn filter(level: Option<&str>) -> EnvFilter {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    match "hyper=warn".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_level_wins() {
        let filter = filter(Some("scalp_dashboard=trace")).to_string();
        assert!(filter.contains("scalp_dashboard=trace"));
        assert!(filter.contains("hyper=warn"));
    }

    #[test]
    fn test_unparseable_level_falls_back() {
        let filter = filter(Some("scalp_dashboard=[")).to_string();
        assert!(filter.contains("info"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Some("warn"));
        init(None);
    }
}
