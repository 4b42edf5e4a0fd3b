//! Timestamp parsing and display helpers
//!
//! The wire carries RFC 3339 strings; these helpers parse them for
//! ordering and render them for display.

use chrono::{DateTime, Local, Utc};

/// Parse a wire timestamp. `None` for anything malformed.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render a wire timestamp in the local timezone for display,
/// falling back to the raw string when it does not parse
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => raw.to_string(),
    }
}

/// Whether `first` is strictly before `second`; malformed inputs fail open
pub fn is_before(first: &str, second: &str) -> bool {
    match (parse_timestamp(first), parse_timestamp(second)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2026-01-01T00:00:00Z").is_some());
        assert!(parse_timestamp("2026-01-01T12:30:00+02:00").is_some());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_is_before() {
        assert!(is_before("2026-01-01T00:00:00Z", "2026-01-02T00:00:00Z"));
        assert!(!is_before("2026-01-02T00:00:00Z", "2026-01-01T00:00:00Z"));
        // Timezone offsets normalize before comparing
        assert!(is_before(
            "2026-01-01T12:00:00+02:00",
            "2026-01-01T11:00:00Z"
        ));
        assert!(!is_before("garbage", "2026-01-01T00:00:00Z"));
    }

    #[test]
    fn test_format_falls_back_on_malformed_input() {
        assert_eq!(format_timestamp("garbage"), "garbage");
    }
}
