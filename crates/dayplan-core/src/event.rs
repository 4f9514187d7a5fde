//! Calendar events as supplied by the calendar store.
//!
//! Events arrive already timezone-resolved and with recurrence expanded into
//! concrete instances. The engine only reads the identifier, the two instants
//! and the all-day flag; everything else rides along as opaque payload.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Wire format used when building timestamps from typed values.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Naive layouts accepted in addition to RFC 3339.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A single scheduled meeting for the focused day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Identifier, unique within one day's input
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Start instant (ISO-8601)
    #[serde(default)]
    pub start: Option<String>,
    /// End instant (ISO-8601)
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    /// Everything the engine does not look at
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl CalendarEvent {
    /// Create an event with no times set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            start: None,
            end: None,
            all_day: false,
            payload: serde_json::Value::Null,
        }
    }

    /// Create a timed event from local wall-clock instants
    pub fn timed(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(id)
            .with_start(start.format(TIMESTAMP_FORMAT).to_string())
            .with_end(end.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Create an all-day event for the given date
    pub fn all_day(id: impl Into<String>, date: NaiveDate) -> Self {
        let mut event = Self::new(id).with_start(date.format("%Y-%m-%d").to_string());
        event.all_day = true;
        event
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// A parsed event instant.
///
/// `wall` is the local wall-clock reading used for placement on the timeline.
/// `instant` is set when the source carried an offset, so durations across an
/// offset change (DST transitions) are measured on the real timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTime {
    pub wall: NaiveDateTime,
    pub instant: Option<DateTime<FixedOffset>>,
}

impl EventTime {
    /// Elapsed time from `self` to `later`.
    ///
    /// Uses real time when both ends carry an offset, wall-clock time otherwise.
    pub fn until(&self, later: &EventTime) -> TimeDelta {
        match (self.instant, later.instant) {
            (Some(from), Some(to)) => to.signed_duration_since(from),
            _ => later.wall.signed_duration_since(self.wall),
        }
    }
}

/// Parse a calendar-store timestamp, keeping its offset when present.
///
/// Accepts RFC 3339 or naive local values. Returns `None` for anything else.
pub fn parse_event_time(raw: &str) -> Option<EventTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(EventTime {
            wall: dt.naive_local(),
            instant: Some(dt),
        });
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|wall| EventTime {
            wall,
            instant: None,
        })
}

/// Parse a calendar-store timestamp into local wall-clock time.
///
/// RFC 3339 values keep their wall-clock reading and drop the offset, since
/// the store has already resolved them into the viewer's zone. Naive values
/// are taken as-is. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    parse_event_time(raw).map(|time| time.wall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_rfc3339_keeps_wall_clock() {
        let parsed = parse_timestamp("2026-10-18T09:30:00+02:00").unwrap();
        assert_eq!(parsed.hour(), 9);
        assert_eq!(parsed.minute(), 30);

        let utc = parse_timestamp("2026-10-18T23:15:00Z").unwrap();
        assert_eq!(utc.hour(), 23);
    }

    #[test]
    fn test_parse_naive_variants() {
        for raw in [
            "2026-10-18T09:30:00",
            "2026-10-18T09:30",
            "2026-10-18 09:30:00",
            "2026-10-18 09:30",
            "2026-10-18T09:30:00.250",
            "  2026-10-18T09:30  ",
        ] {
            let parsed = parse_timestamp(raw).unwrap_or_else(|| panic!("failed on {raw}"));
            assert_eq!((parsed.hour(), parsed.minute()), (9, 30), "{raw}");
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("tomorrow morning").is_none());
        assert!(parse_timestamp("2026-10-18").is_none());
        assert!(parse_timestamp("2026-13-40T09:00").is_none());
    }

    #[test]
    fn test_until_uses_real_time_across_offset_change() {
        // Clocks go back at 03:00+02:00: 02:30 summer time to 02:15 winter time is 45 minutes
        let start = parse_event_time("2026-10-25T02:30:00+02:00").unwrap();
        let end = parse_event_time("2026-10-25T02:15:00+01:00").unwrap();
        assert_eq!(start.until(&end), TimeDelta::minutes(45));
        assert!(end.wall < start.wall);

        // Naive on either side falls back to the wall clock
        let naive_end = parse_event_time("2026-10-25T03:00:00").unwrap();
        assert!(naive_end.instant.is_none());
        assert_eq!(start.until(&naive_end), TimeDelta::minutes(30));
    }

    #[test]
    fn test_timed_builder_round_trips_through_parser() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let end = start + chrono::Duration::minutes(45);
        let event = CalendarEvent::timed("a", start, end).with_title("Briefing");

        assert_eq!(parse_timestamp(event.start.as_deref().unwrap()), Some(start));
        assert_eq!(parse_timestamp(event.end.as_deref().unwrap()), Some(end));
        assert_eq!(event.title.as_deref(), Some("Briefing"));
        assert!(!event.all_day);
    }

    #[test]
    fn test_deserialize_from_store_json() {
        let json = r#"{
            "id": "evt-1",
            "title": "Cabinet",
            "start": "2026-10-18T10:00:00",
            "end": "2026-10-18T11:00:00",
            "allDay": false,
            "payload": {"location": "Room 4"}
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "evt-1");
        assert_eq!(event.payload["location"], "Room 4");

        // Optional fields default
        let bare: CalendarEvent = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(bare.start.is_none());
        assert!(!bare.all_day);
        assert!(bare.payload.is_null());
    }
}
