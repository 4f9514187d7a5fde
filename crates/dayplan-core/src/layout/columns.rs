//! Greedy column assignment within one cluster.
//!
//! Intervals are visited in layout order and dropped into the first column
//! whose previous occupant has already ended. Sorted by start, this greedy
//! colouring of an interval graph opens exactly as many columns as the
//! cluster's clique number. The column cap bounds the visual width on
//! overbooked days: once it is reached, further intervals share the column
//! that frees up soonest and are marked `forced`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cluster::{layout_order, Cluster};
use crate::interval::Interval;

/// Default maximum number of side-by-side columns per cluster
pub const DEFAULT_COLUMN_CAP: usize = 4;

/// Upper bound on columns opened per cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnCap {
    /// At most this many columns (values below 1 behave as 1)
    Bounded(usize),
    Unbounded,
}

impl ColumnCap {
    /// Effective limit, `None` when unbounded
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Bounded(n) => Some((*n).max(1)),
            Self::Unbounded => None,
        }
    }

    /// Whether another column may be opened when `open` already are
    pub fn allows_another(&self, open: usize) -> bool {
        self.limit().map_or(true, |limit| open < limit)
    }
}

impl Default for ColumnCap {
    fn default() -> Self {
        Self::Bounded(DEFAULT_COLUMN_CAP)
    }
}

/// Placement of one event on the day timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub event_id: String,
    /// Zero-based lane within the cluster
    pub column: usize,
    /// Lanes used by the whole cluster
    pub total_columns: usize,
    /// Placed over an overlapping occupant because the cap was reached
    #[serde(default)]
    pub forced: bool,
}

/// Column of the occupant that ends soonest; lowest index on ties.
fn soonest_ending(column_ends: &[u32]) -> usize {
    column_ends
        .iter()
        .enumerate()
        .min_by_key(|(index, end)| (**end, *index))
        .map(|(index, _)| index)
        .unwrap_or(0)
}

/// Assign a column to every member of one cluster.
pub fn assign_columns(cluster: &Cluster, cap: ColumnCap) -> BTreeMap<String, LayoutInfo> {
    debug_assert!(
        cluster.is_connected(),
        "assign_columns called with intervals from more than one cluster"
    );

    let mut ordered: Vec<&Interval> = cluster.members().iter().collect();
    ordered.sort_by(|a, b| layout_order(a, b));

    // Last end minute per open column
    let mut column_ends: Vec<u32> = Vec::new();
    let mut placements: Vec<(&Interval, usize, bool)> = Vec::with_capacity(ordered.len());

    for interval in ordered {
        let placement = match column_ends.iter().position(|&end| end <= interval.start()) {
            Some(column) => {
                column_ends[column] = interval.end();
                (interval, column, false)
            }
            None if cap.allows_another(column_ends.len()) => {
                column_ends.push(interval.end());
                (interval, column_ends.len() - 1, false)
            }
            None => {
                let column = soonest_ending(&column_ends);
                column_ends[column] = column_ends[column].max(interval.end());
                tracing::warn!(
                    event_id = interval.event_id(),
                    column,
                    cap = ?cap,
                    "column cap reached, event shares a column with an overlapping meeting"
                );
                (interval, column, true)
            }
        };
        placements.push(placement);
    }

    let total_columns = column_ends.len();
    placements
        .into_iter()
        .map(|(interval, column, forced)| {
            (
                interval.event_id().to_string(),
                LayoutInfo {
                    event_id: interval.event_id().to_string(),
                    column,
                    total_columns,
                    forced,
                },
            )
        })
        .collect()
}
