//! Minute-of-day intervals and the overlap predicate.
//!
//! Every layer that needs to know whether two meetings collide goes through
//! [`overlaps`]. Intervals are half-open, so a meeting ending at 10:00 and one
//! starting at 10:00 do not conflict.
//!
//! An interval is anchored on its start's local day and clipped at that day's
//! midnight. A meeting that began the previous evening and runs into the
//! focused day is therefore drawn at the tail of its start day, not at the top
//! of the focused one: callers must split such events at midnight upstream and
//! pass the focused day's part with its own start.

use chrono::{TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{parse_event_time, CalendarEvent};

/// Length of the timeline in minutes
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Length of the timeline in seconds
const SECONDS_PER_DAY: i64 = MINUTES_PER_DAY as i64 * 60;

/// An event reduced to `[start, end)` minutes since local midnight.
///
/// Always non-empty: the only way to build one is [`Interval::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    event_id: String,
    start: u32,
    end: u32,
}

impl Interval {
    /// Create an interval, or `None` if `end <= start`
    pub fn new(event_id: impl Into<String>, start: u32, end: u32) -> Option<Self> {
        if end <= start {
            return None;
        }
        Some(Self {
            event_id: event_id.into(),
            start,
            end,
        })
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// First minute covered
    pub fn start(&self) -> u32 {
        self.start
    }

    /// First minute no longer covered
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Duration in minutes
    pub fn duration(&self) -> u32 {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        overlaps(self, other)
    }

    /// Minutes shared with `other`, zero when they do not overlap
    pub fn overlap_minutes(&self, other: &Interval) -> u32 {
        if !overlaps(self, other) {
            return 0;
        }
        self.end.min(other.end) - self.start.max(other.start)
    }
}

/// Half-open intersection test
#[inline]
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.start < b.end && b.start < a.end
}

/// Why an event was left out of the layout
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    #[error("event has no start time")]
    MissingStart,

    #[error("event has no end time")]
    MissingEnd,

    #[error("all-day events are not laid out on the timeline")]
    AllDay,

    #[error("unparseable start time '{raw}'")]
    UnparseableStart { raw: String },

    #[error("unparseable end time '{raw}'")]
    UnparseableEnd { raw: String },

    #[error("end ({end}) is not after start ({start})")]
    EmptyOrNegative { start: String, end: String },
}

/// Diagnostic for an event that was dropped from layout and conflicts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclusion {
    pub event_id: String,
    pub reason: ExclusionReason,
}

/// Reduce an event to its minute-of-day interval.
///
/// The start is placed at its wall-clock minute of day and the end at start
/// plus the elapsed time. When both instants carry an offset the elapsed time
/// is measured on the real timeline, so meetings spanning a DST change keep
/// their true length. The end is clipped at the end of the start's day.
/// Seconds are truncated, so sub-minute events come out empty and are
/// rejected.
pub fn to_interval(event: &CalendarEvent) -> Result<Interval, ExclusionReason> {
    if event.all_day {
        return Err(ExclusionReason::AllDay);
    }

    let raw_start = event.start.as_deref().ok_or(ExclusionReason::MissingStart)?;
    let raw_end = event.end.as_deref().ok_or(ExclusionReason::MissingEnd)?;

    let start = parse_event_time(raw_start).ok_or_else(|| ExclusionReason::UnparseableStart {
        raw: raw_start.to_string(),
    })?;
    let end = parse_event_time(raw_end).ok_or_else(|| ExclusionReason::UnparseableEnd {
        raw: raw_end.to_string(),
    })?;

    let empty = || ExclusionReason::EmptyOrNegative {
        start: raw_start.to_string(),
        end: raw_end.to_string(),
    };

    let elapsed = start.until(&end);
    if elapsed <= TimeDelta::zero() {
        return Err(empty());
    }

    let start_secs = i64::from(start.wall.num_seconds_from_midnight());
    let end_secs = start_secs
        .saturating_add(elapsed.num_seconds())
        .min(SECONDS_PER_DAY);

    Interval::new(
        event.id.clone(),
        (start_secs / 60) as u32,
        (end_secs / 60) as u32,
    )
    .ok_or_else(empty)
}

/// Split a day's events into layable intervals and exclusion diagnostics,
/// both in input order.
pub fn partition_events(events: &[CalendarEvent]) -> (Vec<Interval>, Vec<Exclusion>) {
    let mut intervals = Vec::with_capacity(events.len());
    let mut excluded = Vec::new();

    for event in events {
        match to_interval(event) {
            Ok(interval) => intervals.push(interval),
            Err(reason) => {
                tracing::debug!(event_id = %event.id, %reason, "excluding event from day layout");
                excluded.push(Exclusion {
                    event_id: event.id.clone(),
                    reason,
                });
            }
        }
    }

    (intervals, excluded)
}
