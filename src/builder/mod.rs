//! Graph builder
//!
//! Turns song records into a [`CollaborationGraph`] according to a
//! [`GroupingPolicy`]. Malformed records are skipped and counted, never
//! fatal; an empty input gives an empty graph.

pub mod policy;

pub use policy::{CollaborationGroup, GroupingPolicy, Role};

use crate::error::ConfigResult;
use crate::graph::CollaborationGraph;
use crate::record::SongRecord;
use serde::Serialize;
use tracing::debug;

/// Counters describing one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Records offered to the builder
    pub records_seen: usize,
    /// Records that contributed groups
    pub records_used: usize,
    /// Records skipped as malformed (no year, or no credited person)
    pub records_skipped: usize,
    /// Collaboration groups formed across all used records
    pub groups_formed: usize,
    /// Groups with fewer than two people, which add nodes but no edges
    pub groups_without_edges: usize,
}

/// Result of a graph build
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub graph: CollaborationGraph,
    pub report: BuildReport,
}

/// Builds collaboration graphs under one validated grouping policy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphBuilder {
    policy: GroupingPolicy,
}

impl GraphBuilder {
    /// Create a builder, rejecting an invalid policy
    pub fn new(policy: GroupingPolicy) -> ConfigResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &GroupingPolicy {
        &self.policy
    }

    /// Build a fresh graph from `records`.
    ///
    /// Every member of every group becomes a node, even in groups too small
    /// to form an edge. Each unordered pair within a group adds 1 to its
    /// edge weight.
    pub fn build<'a, I>(&self, records: I) -> BuildResult
    where
        I: IntoIterator<Item = &'a SongRecord>,
    {
        let mut graph = CollaborationGraph::new();
        let mut report = BuildReport::default();

        for record in records {
            report.records_seen += 1;

            if record.is_malformed() {
                report.records_skipped += 1;
                debug!("Skipping malformed record {:?}", record);
                continue;
            }
            report.records_used += 1;

            for group in self.policy.groups(record) {
                report.groups_formed += 1;

                let ids: Vec<_> = group
                    .members()
                    .iter()
                    .map(|name| graph.add_person(name))
                    .collect();

                if !group.has_pairs() {
                    report.groups_without_edges += 1;
                    continue;
                }

                for (i, &a) in ids.iter().enumerate() {
                    for &b in &ids[i + 1..] {
                        graph.add_collaboration(a, b);
                    }
                }
            }
        }

        debug!(
            "Built graph with {} nodes, {} edges from {} records ({} skipped)",
            graph.node_count(),
            graph.edge_count(),
            report.records_seen,
            report.records_skipped
        );

        BuildResult { graph, report }
    }
}
