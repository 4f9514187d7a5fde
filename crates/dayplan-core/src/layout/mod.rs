//! Day timeline layout.
//!
//! This module provides:
//! - Overlap clustering of a day's timed meetings
//! - Greedy column assignment per cluster, bounded by a column cap
//! - [`LayoutEngine`], which validates a day's input and runs both
//!
//! Rendering turns `column / total_columns` into horizontal position and
//! width; that happens downstream.

mod cluster;
mod columns;


pub use cluster::{build_clusters, Cluster};
pub use columns::{assign_columns, ColumnCap, LayoutInfo, DEFAULT_COLUMN_CAP};

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::conflict::{self, ConflictMap};
use crate::error::{LayoutError, Result};
use crate::event::CalendarEvent;
use crate::interval::{partition_events, Exclusion};

/// Per-cluster summary, mainly for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// Members in layout order
    pub event_ids: Vec<String>,
    pub total_columns: usize,
    /// Most meetings running at the same minute
    pub max_overlap: usize,
    /// Members placed over an overlapping occupant
    pub forced_count: usize,
}

/// Result of laying out one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    pub assignments: BTreeMap<String, LayoutInfo>,
    /// Clusters ordered by earliest start
    pub clusters: Vec<ClusterSummary>,
    /// Events left out, in input order
    pub excluded: Vec<Exclusion>,
}

impl DayLayout {
    pub fn get(&self, event_id: &str) -> Option<&LayoutInfo> {
        self.assignments.get(event_id)
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of events placed by the column-cap overflow rule
    pub fn forced_count(&self) -> usize {
        self.assignments.values().filter(|info| info.forced).count()
    }

    pub fn into_assignments(self) -> BTreeMap<String, LayoutInfo> {
        self.assignments
    }
}

/// Reject input in which two events share an identifier.
///
/// # Errors
///
/// Returns [`LayoutError::DuplicateEventId`] naming the first repeated id.
pub fn ensure_unique_ids(events: &[CalendarEvent]) -> Result<()> {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if !seen.insert(event.id.as_str()) {
            return Err(LayoutError::DuplicateEventId {
                id: event.id.clone(),
            });
        }
    }
    Ok(())
}

/// Configured entry point for laying out a day
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine, validating the config
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out one day's events.
    ///
    /// Every valid event gets an assignment, however busy the day. Invalid
    /// events are listed in [`DayLayout::excluded`].
    ///
    /// # Errors
    ///
    /// Returns an error if two events share an identifier.
    pub fn compute(&self, events: &[CalendarEvent]) -> Result<DayLayout> {
        ensure_unique_ids(events)?;

        let (intervals, excluded) = partition_events(events);
        let cap = self.config.column_cap();

        let mut layout = DayLayout {
            excluded,
            ..DayLayout::default()
        };

        for cluster in build_clusters(&intervals) {
            let placed = assign_columns(&cluster, cap);
            layout.clusters.push(ClusterSummary {
                event_ids: cluster.event_ids().map(str::to_string).collect(),
                total_columns: placed.values().map(|info| info.total_columns).max().unwrap_or(0),
                max_overlap: cluster.max_overlap(),
                forced_count: placed.values().filter(|info| info.forced).count(),
            });
            layout.assignments.extend(placed);
        }

        tracing::debug!(
            events = events.len(),
            laid_out = layout.assignments.len(),
            excluded = layout.excluded.len(),
            clusters = layout.clusters.len(),
            forced = layout.forced_count(),
            "computed day layout"
        );

        Ok(layout)
    }

    /// Direct pairwise conflicts for one day's events.
    ///
    /// # Errors
    ///
    /// Returns an error if two events share an identifier.
    pub fn detect_conflicts(&self, events: &[CalendarEvent]) -> Result<ConflictMap> {
        ensure_unique_ids(events)?;
        Ok(conflict::detect_conflicts(events))
    }
}

/// Lay out one day's events with the default column cap.
///
/// # Errors
///
/// Returns an error if two events share an identifier.
pub fn compute_layout(events: &[CalendarEvent]) -> Result<BTreeMap<String, LayoutInfo>> {
    LayoutEngine::default()
        .compute(events)
        .map(DayLayout::into_assignments)
}

/// Direct conflicts for one day's events.
///
/// Same as [`LayoutEngine::detect_conflicts`] on a default engine. For the
/// raw pairwise scan without the identifier check, see
/// [`conflict::detect_conflicts`].
///
/// # Errors
///
/// Returns an error if two events share an identifier.
pub fn detect_conflicts(events: &[CalendarEvent]) -> Result<ConflictMap> {
    LayoutEngine::default().detect_conflicts(events)
}
