//! Node-link export
//!
//! Flattens an [`AnnotatedGraph`] into plain node and edge lists that any
//! renderer can consume. Output order is fixed (nodes by id string, edges by
//! source then target) so repeated exports of the same input are identical.

use crate::annotate::AnnotatedGraph;
use serde::{Deserialize, Serialize};

/// One person in the export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLink {
    /// Normalized display name
    pub id: String,
    pub size: f64,
    pub color: String,
    pub community: usize,
    pub weighted_degree: u64,
}

/// One collaboration edge in the export, `source < target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLink {
    pub source: String,
    pub target: String,
    pub weight: u64,
    pub width: f64,
}

/// Renderer-neutral node-link structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkGraph {
    pub nodes: Vec<NodeLink>,
    pub edges: Vec<EdgeLink>,
}

impl NodeLinkGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Export every node and edge of `annotated` exactly once
pub fn export(annotated: &AnnotatedGraph<'_>) -> NodeLinkGraph {
    let graph = annotated.graph();

    let mut nodes: Vec<NodeLink> = annotated
        .nodes()
        .map(|(_, name, attrs)| NodeLink {
            id: name.to_string(),
            size: attrs.size,
            color: attrs.color.clone(),
            community: attrs.community,
            weighted_degree: attrs.weighted_degree,
        })
        .collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let mut edges: Vec<EdgeLink> = annotated
        .edges()
        .iter()
        .filter_map(|annotated_edge| {
            let a = graph.name(annotated_edge.edge.source)?;
            let b = graph.name(annotated_edge.edge.target)?;
            let (source, target) = if a <= b { (a, b) } else { (b, a) };
            Some(EdgeLink {
                source: source.to_string(),
                target: target.to_string(),
                weight: annotated_edge.edge.weight,
                width: annotated_edge.width,
            })
        })
        .collect();
    edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

    NodeLinkGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::{CommunityDetector, Partition};
    use crate::annotate::Annotator;
    use crate::builder::GraphBuilder;
    use crate::graph::CollaborationGraph;
    use crate::record::SongRecord;

    fn graph() -> CollaborationGraph {
        let records = vec![
            SongRecord::new(1970, Some("Zoe"), Some("Mark"), Some("Anna")),
            SongRecord::new(1971, None, None, Some("Loner")),
        ];
        GraphBuilder::default().build(&records).graph
    }

    #[test]
    fn test_export_orders_by_name() {
        let graph = graph();
        let partition = CommunityDetector::default().detect(&graph);
        let annotated = Annotator::default().annotate(&graph, &partition).unwrap();
        let out = export(&annotated);

        let ids: Vec<&str> = out.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Anna", "Loner", "Mark", "Zoe"]);

        let pairs: Vec<(&str, &str)> = out
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("Anna", "Mark"), ("Anna", "Zoe"), ("Mark", "Zoe")]);
        assert!(out.edges.iter().all(|e| e.weight == 1 && e.width == 1.0));

        let loner = &out.nodes[1];
        assert_eq!(loner.weighted_degree, 0);
        assert_eq!(loner.size, 5.0);
    }

    #[test]
    fn test_export_is_stable() {
        let graph = graph();
        let partition = CommunityDetector::default().detect(&graph);
        let annotated = Annotator::default().annotate(&graph, &partition).unwrap();
        assert_eq!(export(&annotated), export(&annotated));
        assert_eq!(
            export(&annotated).to_json().unwrap(),
            export(&annotated).to_json().unwrap()
        );
    }

    #[test]
    fn test_empty_export() {
        let graph = CollaborationGraph::new();
        let annotated = Annotator::default()
            .annotate(&graph, &Partition::new(Vec::new()))
            .unwrap();
        let out = export(&annotated);
        assert!(out.is_empty());
        assert_eq!(out.to_json().unwrap(), r#"{"nodes":[],"edges":[]}"#);
    }

    #[test]
    fn test_json_shape() {
        let graph = graph();
        let partition = Partition::new(vec![0, 0, 0, 1]);
        let annotated = Annotator::default().annotate(&graph, &partition).unwrap();
        let value: serde_json::Value = serde_json::from_str(&export(&annotated).to_json().unwrap()).unwrap();

        assert_eq!(value["nodes"][0]["id"], "Anna");
        assert_eq!(value["nodes"][0]["color"], "#1f77b4");
        assert_eq!(value["nodes"][1]["color"], "#ff7f0e");
        assert_eq!(value["edges"][0]["source"], "Anna");
        assert_eq!(value["edges"][0]["weight"], 1);
    }
}
