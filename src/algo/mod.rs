//! Community detection module
//!
//! The Louvain implementation lives in the `collabnet-algorithms` crate.
//! This module provides the integration/adapter layer: it projects a
//! [`CollaborationGraph`] onto a CSR [`GraphView`] and maps the result back
//! to people as a [`Partition`].

use crate::error::ConfigResult;
use crate::graph::{CollaborationGraph, PersonId};
use collabnet_algorithms::NodeId as AlgoNodeId;
use serde::Serialize;
use std::collections::HashMap;

// Re-export algorithms
pub use collabnet_algorithms::{
    louvain, modularity, GraphView, LouvainConfig, LouvainError, LouvainResult,
};

/// Build a GraphView from the collaboration graph for algorithm execution.
///
/// Dense indices follow ascending person name, which fixes the order in which
/// the detector visits nodes. `index_to_node` holds the `PersonId` values.
pub fn build_view(graph: &CollaborationGraph) -> GraphView {
    // 1. Order people by name
    let mut people: Vec<(PersonId, &str)> = graph.nodes().collect();
    people.sort_by(|a, b| a.1.cmp(b.1));

    // 2. Build index mappings
    let index_to_node: Vec<AlgoNodeId> = people.iter().map(|(id, _)| id.as_u64()).collect();
    let mut position = vec![0usize; graph.node_count()];
    for (idx, (id, _)) in people.iter().enumerate() {
        position[id.index()] = idx;
    }

    // 3. Weighted edge list over dense indices
    let edges: Vec<(usize, usize, f64)> = graph
        .edges()
        .iter()
        .map(|e| (position[e.source.index()], position[e.target.index()], e.weight as f64))
        .collect();

    GraphView::from_edges(index_to_node, &edges)
}

/// Total assignment of people to communities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    /// PersonId index -> community id
    assignment: Vec<usize>,
    community_count: usize,
    modularity: f64,
    levels: usize,
}

impl Partition {
    /// Wrap an explicit assignment, indexed by `PersonId`.
    ///
    /// Modularity and level count are unknown for a hand-made partition and
    /// reported as zero.
    pub fn new(assignment: Vec<usize>) -> Self {
        let community_count = assignment.iter().copied().max().map_or(0, |c| c + 1);
        Self {
            assignment,
            community_count,
            modularity: 0.0,
            levels: 0,
        }
    }

    pub fn community_of(&self, id: PersonId) -> Option<usize> {
        self.assignment.get(id.index()).copied()
    }

    /// Number of people covered
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Upper bound of community ids (ids are `0..community_count`)
    pub fn community_count(&self) -> usize {
        self.community_count
    }

    /// Member count per community id
    pub fn community_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.community_count];
        for &c in &self.assignment {
            sizes[c] += 1;
        }
        sizes
    }

    /// Members of one community in id order
    pub fn members(&self, community: usize) -> Vec<PersonId> {
        self.iter()
            .filter(|&(_, c)| c == community)
            .map(|(id, _)| id)
            .collect()
    }

    /// `(person, community)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, usize)> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .map(|(idx, &c)| (PersonId::from(idx), c))
    }

    /// Modularity reached by the detector
    pub fn modularity(&self) -> f64 {
        self.modularity
    }

    /// Aggregation levels the detector kept
    pub fn levels(&self) -> usize {
        self.levels
    }
}

/// Louvain detector bound to validated settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunityDetector {
    config: LouvainConfig,
}

impl CommunityDetector {
    pub fn new(config: LouvainConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LouvainConfig {
        &self.config
    }

    /// Partition every person of `graph`.
    ///
    /// An empty graph gives an empty partition; a graph without edges gives
    /// one singleton community per person.
    pub fn detect(&self, graph: &CollaborationGraph) -> Partition {
        let view = build_view(graph);
        let result = louvain(&view, &self.config);

        let node_community: &HashMap<AlgoNodeId, usize> = &result.node_community;
        let mut assignment = vec![0; graph.node_count()];
        for (&node, &community) in node_community {
            assignment[PersonId::new(node).index()] = community;
        }

        Partition {
            assignment,
            community_count: result.community_count(),
            modularity: result.modularity,
            levels: result.levels,
        }
    }
}
