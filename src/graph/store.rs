//! In-memory collaboration graph
//!
//! Undirected, simple, weighted: people are interned by name, repeated
//! co-occurrences accumulate into a single edge weight, and self-loops are
//! never stored.

use super::edge::Edge;
use super::types::PersonId;
use indexmap::IndexSet;
use rustc_hash::FxHashMap;

/// Collaboration graph over normalized person names
///
/// Uses dense per-person tables:
/// - persons: insertion-ordered name set, position = PersonId
/// - adjacency: PersonId -> (neighbor -> weight), kept symmetric
#[derive(Debug, Clone, Default)]
pub struct CollaborationGraph {
    persons: IndexSet<String>,
    adjacency: Vec<FxHashMap<PersonId, u64>>,
    edge_count: usize,
}

impl CollaborationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a person, returning the existing id when the name is known
    pub(crate) fn add_person(&mut self, name: &str) -> PersonId {
        if let Some(idx) = self.persons.get_index_of(name) {
            return PersonId::from(idx);
        }
        let (idx, _) = self.persons.insert_full(name.to_string());
        self.adjacency.push(FxHashMap::default());
        PersonId::from(idx)
    }

    /// Add one co-occurrence of `a` and `b`.
    ///
    /// Returns the new weight, or `None` when `a == b` (no self-loops) or
    /// either id is unknown.
    pub(crate) fn add_collaboration(&mut self, a: PersonId, b: PersonId) -> Option<u64> {
        if a == b || a.index() >= self.adjacency.len() || b.index() >= self.adjacency.len() {
            return None;
        }

        let weight = {
            let w = self.adjacency[a.index()].entry(b).or_insert(0);
            *w += 1;
            *w
        };
        self.adjacency[b.index()].insert(a, weight);

        if weight == 1 {
            self.edge_count += 1;
        }
        Some(weight)
    }

    pub fn node_count(&self) -> usize {
        self.persons.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.persons.contains(name)
    }

    /// Look up a person by normalized name
    pub fn node_id(&self, name: &str) -> Option<PersonId> {
        self.persons.get_index_of(name).map(PersonId::from)
    }

    pub fn name(&self, id: PersonId) -> Option<&str> {
        self.persons.get_index(id.index()).map(String::as_str)
    }

    /// All people in id order
    pub fn nodes(&self) -> impl Iterator<Item = (PersonId, &str)> + '_ {
        self.persons
            .iter()
            .enumerate()
            .map(|(idx, name)| (PersonId::from(idx), name.as_str()))
    }

    /// Every edge exactly once, ordered by (source, target) id
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .adjacency
            .iter()
            .enumerate()
            .flat_map(|(idx, row)| {
                let source = PersonId::from(idx);
                row.iter()
                    .filter(move |&(&target, _)| source < target)
                    .map(move |(&target, &weight)| Edge::new(source, target, weight))
            })
            .collect();
        edges.sort_by_key(|e| (e.source, e.target));
        edges
    }

    /// Weight of the edge between `a` and `b` in either order
    pub fn edge_weight(&self, a: PersonId, b: PersonId) -> Option<u64> {
        self.adjacency.get(a.index())?.get(&b).copied()
    }

    /// Weight of the edge between two people named by their normalized names
    pub fn edge_weight_by_name(&self, a: &str, b: &str) -> Option<u64> {
        self.edge_weight(self.node_id(a)?, self.node_id(b)?)
    }

    /// Neighbors of a person with the shared weight, ordered by id
    pub fn neighbors(&self, id: PersonId) -> Vec<(PersonId, u64)> {
        let mut neighbors: Vec<(PersonId, u64)> = self
            .adjacency
            .get(id.index())
            .map(|row| row.iter().map(|(&p, &w)| (p, w)).collect())
            .unwrap_or_default();
        neighbors.sort_by_key(|&(p, _)| p);
        neighbors
    }

    /// Number of distinct collaborators
    pub fn degree(&self, id: PersonId) -> usize {
        self.adjacency.get(id.index()).map_or(0, |row| row.len())
    }

    /// Sum of the weights of all incident edges
    pub fn weighted_degree(&self, id: PersonId) -> u64 {
        self.adjacency
            .get(id.index())
            .map_or(0, |row| row.values().sum())
    }

    /// Sum of all edge weights, each edge counted once
    pub fn total_weight(&self) -> u64 {
        self.adjacency
            .iter()
            .map(|row| row.values().sum::<u64>())
            .sum::<u64>()
            / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_is_stable() {
        let mut graph = CollaborationGraph::new();
        let a = graph.add_person("Alpha");
        let b = graph.add_person("Beta");
        assert_eq!(graph.add_person("Alpha"), a);
        assert_eq!(a, PersonId(0));
        assert_eq!(b, PersonId(1));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.name(b), Some("Beta"));
        assert_eq!(graph.node_id("Beta"), Some(b));
        assert_eq!(graph.node_id("Gamma"), None);
    }

    #[test]
    fn test_weights_accumulate_symmetrically() {
        let mut graph = CollaborationGraph::new();
        let a = graph.add_person("Alpha");
        let b = graph.add_person("Beta");

        assert_eq!(graph.add_collaboration(a, b), Some(1));
        assert_eq!(graph.add_collaboration(b, a), Some(2));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight(a, b), Some(2));
        assert_eq!(graph.edge_weight(b, a), Some(2));
        assert_eq!(graph.edge_weight_by_name("Beta", "Alpha"), Some(2));
        assert_eq!(graph.total_weight(), 2);
    }

    #[test]
    fn test_no_self_loops() {
        let mut graph = CollaborationGraph::new();
        let a = graph.add_person("Alpha");
        assert_eq!(graph.add_collaboration(a, a), None);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.edge_weight(a, a), None);
    }

    #[test]
    fn test_degrees_and_edges() {
        let mut graph = CollaborationGraph::new();
        let a = graph.add_person("Alpha");
        let b = graph.add_person("Beta");
        let c = graph.add_person("Gamma");
        let d = graph.add_person("Delta");
        graph.add_collaboration(c, a);
        graph.add_collaboration(a, b);
        graph.add_collaboration(a, b);

        assert_eq!(graph.degree(a), 2);
        assert_eq!(graph.weighted_degree(a), 3);
        assert_eq!(graph.weighted_degree(d), 0);
        assert_eq!(graph.neighbors(a), vec![(b, 2), (c, 1)]);
        assert_eq!(
            graph.edges(),
            vec![Edge::new(a, b, 2), Edge::new(a, c, 1)]
        );
    }
}
