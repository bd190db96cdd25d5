//! Undirected weighted collaboration edge

use super::types::PersonId;
use serde::{Deserialize, Serialize};

/// An undirected edge between two people.
///
/// `source < target` always holds, so one pair has exactly one spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: PersonId,
    pub target: PersonId,
    /// Number of collaboration groups the two people share (>= 1)
    pub weight: u64,
}

impl Edge {
    /// Create an edge, ordering the endpoints
    pub fn new(a: PersonId, b: PersonId, weight: u64) -> Self {
        let (source, target) = if a <= b { (a, b) } else { (b, a) };
        Edge { source, target, weight }
    }

    /// The endpoint opposite `person`, if `person` is an endpoint
    pub fn other(&self, person: PersonId) -> Option<PersonId> {
        if person == self.source {
            Some(self.target)
        } else if person == self.target {
            Some(self.source)
        } else {
            None
        }
    }
}
