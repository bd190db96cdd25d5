//! Core type definitions for the collaboration graph

use serde::{Deserialize, Serialize};

/// Dense identifier of a person in one [`CollaborationGraph`](super::CollaborationGraph).
///
/// Ids are assigned in order of first appearance and are only meaningful for
/// the graph that issued them. The `u64` form is what the algorithms crate
/// carries as its `NodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct PersonId(pub u64);

impl PersonId {
    /// Rebuild an id from the algorithms crate's `NodeId`
    pub fn new(id: u64) -> Self {
        PersonId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Position in the graph's dense per-person tables
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for PersonId {
    fn from(idx: usize) -> Self {
        PersonId(idx as u64)
    }
}
