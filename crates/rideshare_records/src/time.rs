use chrono::{DateTime, Utc};

/// Offset timestamp as written by the trip exporter, e.g. `2018-05-25 11:52:40 -0700`.
const TRIP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Parse a trip timestamp, accepting the exporter format or RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, TRIP_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exporter_format_with_offset() {
        let parsed = parse_timestamp("2018-05-25 11:52:40 -0700").expect("timestamp");
        assert_eq!(parsed.to_rfc3339(), "2018-05-25T18:52:40+00:00");
    }

    #[test]
    fn parses_rfc3339() {
        assert!(parse_timestamp("2018-05-25T11:52:40Z").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
