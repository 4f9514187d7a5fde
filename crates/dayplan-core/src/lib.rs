//! # Dayplan Core Library
//!
//! Layout and conflict detection for the day-planning calendar view. Given
//! one day's meetings, the engine decides which column each timed meeting is
//! drawn in so overlapping meetings never share space, and reports which
//! meetings directly clash.
//!
//! ## Architecture
//!
//! - **Intervals**: events reduced to `[start, end)` minutes since midnight,
//!   with a single overlap predicate shared by every layer
//! - **Layout**: overlap clusters, then greedy column assignment per cluster
//!   under a configurable column cap
//! - **Conflicts**: pairwise overlap lists, independent of clustering
//!
//! Everything is a pure function of the input: nothing is fetched, stored or
//! cached between calls.
//!
//! ## Key Components
//!
//! - [`LayoutEngine`]: validated, configured entry point
//! - [`compute_layout`] / [`detect_conflicts`]: the two calls the view makes
//! - [`LayoutConfig`]: column cap settings

pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod interval;
pub mod layout;

pub use config::LayoutConfig;
pub use conflict::{conflict_pairs, conflicts_with, count_conflicts, ConflictMap, ConflictPair};
pub use error::{ConfigError, LayoutError, Result};
pub use event::{parse_event_time, parse_timestamp, CalendarEvent, EventTime};
pub use interval::{overlaps, partition_events, to_interval, Exclusion, ExclusionReason, Interval};
pub use layout::{
    assign_columns, build_clusters, compute_layout, detect_conflicts, ensure_unique_ids, Cluster,
    ClusterSummary, ColumnCap, DayLayout, LayoutEngine, LayoutInfo,
};
