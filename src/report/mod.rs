//! Renderers for forecast, alert, SMS and metrics results.
//!
//! - [`terminal`]: colored tables and summary boxes; respects `--verbose` / `--quiet`.
//! - [`png`]: choropleth map of the ward polygons with a gradient legend.

pub mod png;
pub mod terminal;

use chrono::{DateTime, NaiveTime};

/// `15:00` → `3:00 PM`. Anything unparsable is returned as-is.
pub fn display_hour(hour: &str) -> String {
    match NaiveTime::parse_from_str(hour.trim(), "%H:%M") {
        Ok(t) => t.format("%-I:%M %p").to_string(),
        Err(_) => hour.to_string(),
    }
}

/// RFC 3339 timestamp → `30 Jul 2024 06:00 +00:00`. Anything else is returned as-is.
pub fn display_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(t) => t.format("%d %b %Y %H:%M %:z").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_hour() {
        assert_eq!(display_hour("00:00"), "12:00 AM");
        assert_eq!(display_hour("15:00"), "3:00 PM");
        assert_eq!(display_hour("morning"), "morning");
    }

    #[test]
    fn test_display_timestamp() {
        assert_eq!(
            display_timestamp("2024-07-30T06:00:00Z"),
            "30 Jul 2024 06:00 +00:00"
        );
        assert_eq!(display_timestamp("yesterday"), "yesterday");
    }
}
