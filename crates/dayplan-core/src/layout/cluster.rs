//! Grouping of a day's intervals into overlap clusters.
//!
//! A cluster is a connected component of the implicit overlap graph: A and C
//! land in the same cluster when both overlap B, even if they never touch each
//! other. Clusters never overlap one another, so each can be laid out on its
//! own.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::interval::{overlaps, Interval};

/// Layout order: start ascending, longer first, then id.
pub(crate) fn layout_order(a: &Interval, b: &Interval) -> Ordering {
    a.start()
        .cmp(&b.start())
        .then_with(|| b.duration().cmp(&a.duration()))
        .then_with(|| a.event_id().cmp(b.event_id()))
}

/// A maximal set of intervals transitively connected by overlap.
///
/// Only [`build_clusters`] creates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    members: Vec<Interval>,
}

impl Cluster {
    /// Members in layout order
    pub fn members(&self) -> &[Interval] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn event_ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.event_id())
    }

    /// Earliest start and latest end covered by the cluster
    pub fn span(&self) -> Option<(u32, u32)> {
        let start = self.members.iter().map(|m| m.start()).min()?;
        let end = self.members.iter().map(|m| m.end()).max()?;
        Some((start, end))
    }

    /// Largest number of members covering a single instant (clique number).
    pub fn max_overlap(&self) -> usize {
        let mut edges: Vec<(u32, i32)> = self
            .members
            .iter()
            .flat_map(|m| [(m.start(), 1), (m.end(), -1)])
            .collect();
        // Ends sort before starts at the same minute: [a, b) and [b, c) never coexist
        edges.sort_unstable();

        let mut current = 0i32;
        let mut best = 0i32;
        for (_, delta) in edges {
            current += delta;
            best = best.max(current);
        }
        best as usize
    }

    /// True when the overlap graph over the members is connected.
    pub(crate) fn is_connected(&self) -> bool {
        if self.members.len() <= 1 {
            return true;
        }
        let mut seen = vec![false; self.members.len()];
        let mut queue = VecDeque::from([0usize]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(i) = queue.pop_front() {
            for (j, other) in self.members.iter().enumerate() {
                if !seen[j] && overlaps(&self.members[i], other) {
                    seen[j] = true;
                    reached += 1;
                    queue.push_back(j);
                }
            }
        }
        reached == self.members.len()
    }
}

/// Partition intervals into overlap clusters.
///
/// Breadth-first traversal over the implicit overlap graph, O(n²) in the
/// number of intervals. Clusters come back ordered by their earliest member;
/// members stay in layout order.
pub fn build_clusters(intervals: &[Interval]) -> Vec<Cluster> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by(layout_order);

    let n = sorted.len();
    let mut visited = vec![false; n];
    let mut clusters = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;

        let mut queue = VecDeque::from([seed]);
        let mut member_indices = Vec::new();

        while let Some(i) = queue.pop_front() {
            member_indices.push(i);
            for j in 0..n {
                if !visited[j] && overlaps(&sorted[i], &sorted[j]) {
                    visited[j] = true;
                    queue.push_back(j);
                }
            }
        }

        member_indices.sort_unstable();
        let members: Vec<Interval> = member_indices.into_iter().map(|i| sorted[i].clone()).collect();
        tracing::trace!(size = members.len(), "built overlap cluster");
        clusters.push(Cluster { members });
    }

    clusters
}
