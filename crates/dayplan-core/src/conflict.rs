//! Pairwise conflict reporting.
//!
//! Unlike the layout, conflicts are not transitive: in a chain A-B-C where
//! only neighbours overlap, A and C share a cluster but are not in each
//! other's conflict list. Everything here is built on
//! [`overlaps`](crate::interval::overlaps) and never on clusters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::event::CalendarEvent;
use crate::interval::{overlaps, to_interval, Interval};

/// Per-event list of directly overlapping events.
///
/// Only events with at least one conflict have an entry.
pub type ConflictMap = BTreeMap<String, Vec<CalendarEvent>>;

/// One overlapping pair, reported once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictPair {
    /// The earlier-starting event
    pub first: String,
    pub second: String,
    pub overlap_minutes: u32,
}

/// Valid events with their intervals, ordered by start then id.
fn timed_events(events: &[CalendarEvent]) -> Vec<(&CalendarEvent, Interval)> {
    let mut timed: Vec<_> = events
        .iter()
        .filter_map(|event| to_interval(event).ok().map(|interval| (event, interval)))
        .collect();
    timed.sort_by(|(_, a), (_, b)| {
        a.start()
            .cmp(&b.start())
            .then_with(|| a.event_id().cmp(b.event_id()))
    });
    timed
}

/// Visit every overlapping pair once, earlier start first.
fn for_each_overlap<'a>(
    timed: &[(&'a CalendarEvent, Interval)],
    mut visit: impl FnMut(&'a CalendarEvent, &Interval, &'a CalendarEvent, &Interval),
) {
    for (i, (a, a_interval)) in timed.iter().enumerate() {
        for (b, b_interval) in &timed[i + 1..] {
            // Sorted by start: nothing further can overlap `a`
            if b_interval.start() >= a_interval.end() {
                break;
            }
            if overlaps(a_interval, b_interval) {
                visit(*a, a_interval, *b, b_interval);
            }
        }
    }
}

/// Map each event to the events it directly overlaps.
///
/// Symmetric: `b` is listed under `a` exactly when `a` is listed under `b`.
/// Lists are ordered by start time, then id. Invalid events are ignored.
/// Identifiers are not checked for uniqueness; [`crate::detect_conflicts`]
/// does that first.
pub fn detect_conflicts(events: &[CalendarEvent]) -> ConflictMap {
    let timed = timed_events(events);
    let mut map = ConflictMap::new();

    for_each_overlap(&timed, |a, _, b, _| {
        map.entry(a.id.clone()).or_default().push(b.clone());
        map.entry(b.id.clone()).or_default().push(a.clone());
    });

    map
}

/// Every overlapping pair once, ordered by the first event's start.
pub fn conflict_pairs(events: &[CalendarEvent]) -> Vec<ConflictPair> {
    let timed = timed_events(events);
    let mut pairs = Vec::new();

    for_each_overlap(&timed, |a, a_interval, b, b_interval| {
        pairs.push(ConflictPair {
            first: a.id.clone(),
            second: b.id.clone(),
            overlap_minutes: a_interval.overlap_minutes(b_interval),
        });
    });

    pairs
}

/// Number of overlapping pairs, as shown in the "N scheduling conflicts" banner.
pub fn count_conflicts(events: &[CalendarEvent]) -> usize {
    conflict_pairs(events).len()
}

/// Events in `others` that directly overlap `event`.
///
/// For views that check one meeting at a time instead of building the whole
/// map. An event never conflicts with itself (matched by id).
pub fn conflicts_with<'a>(
    event: &CalendarEvent,
    others: &'a [CalendarEvent],
) -> Vec<&'a CalendarEvent> {
    let Ok(target) = to_interval(event) else {
        return Vec::new();
    };

    others
        .iter()
        .filter(|other| other.id != event.id)
        .filter(|other| {
            to_interval(other)
                .map(|interval| overlaps(&target, &interval))
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(id: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::new(id)
            .with_start(format!("2026-10-18T{start}"))
            .with_end(format!("2026-10-18T{end}"))
    }

    fn ids(events: &[CalendarEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    fn chain() -> Vec<CalendarEvent> {
        vec![
            meeting("a", "09:00", "10:00"),
            meeting("b", "09:30", "10:30"),
            meeting("c", "10:15", "11:00"),
            meeting("d", "13:00", "14:00"),
        ]
    }

    #[test]
    fn test_chain_conflicts_are_not_transitive() {
        let map = detect_conflicts(&chain());

        assert_eq!(ids(&map["a"]), vec!["b"]);
        assert_eq!(ids(&map["b"]), vec!["a", "c"]);
        assert_eq!(ids(&map["c"]), vec!["b"]);
        assert!(!map.contains_key("d"));
    }

    #[test]
    fn test_empty_and_conflict_free_days() {
        assert!(detect_conflicts(&[]).is_empty());
        assert!(conflict_pairs(&[]).is_empty());

        let back_to_back = vec![meeting("a", "09:00", "10:00"), meeting("b", "10:00", "11:00")];
        assert!(detect_conflicts(&back_to_back).is_empty());
        assert_eq!(count_conflicts(&back_to_back), 0);
    }

    #[test]
    fn test_invalid_events_are_ignored() {
        let mut all_day = meeting("holiday", "00:00", "23:59");
        all_day.all_day = true;
        let events = vec![
            meeting("a", "09:00", "10:00"),
            meeting("broken", "09:30", "09:00"),
            all_day,
            CalendarEvent::new("untimed"),
        ];
        assert!(detect_conflicts(&events).is_empty());
    }

    #[test]
    fn test_pairs_report_each_overlap_once() {
        let pairs = conflict_pairs(&chain());
        assert_eq!(
            pairs,
            vec![
                ConflictPair {
                    first: "a".into(),
                    second: "b".into(),
                    overlap_minutes: 30,
                },
                ConflictPair {
                    first: "b".into(),
                    second: "c".into(),
                    overlap_minutes: 15,
                },
            ]
        );
        assert_eq!(count_conflicts(&chain()), 2);
    }

    #[test]
    fn test_nested_meetings_all_conflict() {
        let events = vec![
            meeting("day", "08:00", "18:00"),
            meeting("x", "09:00", "10:00"),
            meeting("y", "16:00", "17:00"),
        ];
        let map = detect_conflicts(&events);
        assert_eq!(ids(&map["day"]), vec!["x", "y"]);
        assert_eq!(ids(&map["x"]), vec!["day"]);
        assert_eq!(ids(&map["y"]), vec!["day"]);
        assert_eq!(count_conflicts(&events), 2);
    }

    #[test]
    fn test_conflicts_with_single_event() {
        let events = chain();
        let hits: Vec<_> = conflicts_with(&events[1], &events)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(hits, vec!["a", "c"]);

        assert!(conflicts_with(&events[3], &events).is_empty());
        assert!(conflicts_with(&CalendarEvent::new("untimed"), &events).is_empty());
    }
}
