//! Display attributes derived from graph structure
//!
//! Node size grows linearly with weighted degree, edge width with weight, and
//! colors follow community rank: the largest communities take the palette in
//! order, everything else shares one fallback color.

use crate::algo::Partition;
use crate::error::{AnnotateError, ConfigError, ConfigResult};
use crate::graph::{CollaborationGraph, Edge, PersonId};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;

/// Ten-color categorical palette (Tableau 10)
pub const TABLEAU_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Color of communities ranked past the palette
pub const DEFAULT_FALLBACK_COLOR: &str = "#808080";

/// Size, width and color settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Size of a node with no collaborations
    pub base_size: f64,
    /// Size added per unit of weighted degree
    pub size_scale: f64,
    /// Edge width = weight / width_divisor
    pub width_divisor: f64,
    /// Colors handed out by community rank
    pub palette: Vec<String>,
    pub fallback_color: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            base_size: 5.0,
            size_scale: 2.0,
            width_divisor: 1.0,
            palette: TABLEAU_PALETTE.iter().map(|c| c.to_string()).collect(),
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }
}

impl AnnotationConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [("base_size", self.base_size), ("size_scale", self.size_scale)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSizeConstant { name, value });
            }
        }
        if !self.width_divisor.is_finite() || self.width_divisor <= 0.0 {
            return Err(ConfigError::InvalidWidthDivisor(self.width_divisor));
        }

        let mut seen = HashSet::new();
        for (idx, color) in self.palette.iter().enumerate() {
            let key = color.trim().to_ascii_lowercase();
            if key.is_empty() {
                return Err(ConfigError::BlankPaletteColor(idx));
            }
            if !seen.insert(key) {
                return Err(ConfigError::DuplicatePaletteColor(color.clone()));
            }
        }

        let fallback = self.fallback_color.trim().to_ascii_lowercase();
        if fallback.is_empty() || seen.contains(&fallback) {
            return Err(ConfigError::InvalidFallbackColor(self.fallback_color.clone()));
        }
        Ok(())
    }

    /// `base_size + size_scale * weighted_degree`
    pub fn node_size(&self, weighted_degree: u64) -> f64 {
        self.base_size + self.size_scale * weighted_degree as f64
    }

    /// `weight / width_divisor`
    pub fn edge_width(&self, weight: u64) -> f64 {
        weight as f64 / self.width_divisor
    }
}

/// Derived attributes of one person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeAttributes {
    pub weighted_degree: u64,
    pub community: usize,
    pub size: f64,
    pub color: String,
}

/// An edge with its display width
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnotatedEdge {
    pub edge: Edge,
    pub width: f64,
}

/// Position of a community in the color ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityRank {
    /// 0 = largest community
    pub rank: usize,
    pub community: usize,
    pub members: usize,
    pub color: String,
}

/// A graph together with its display attributes
#[derive(Debug, Clone)]
pub struct AnnotatedGraph<'g> {
    graph: &'g CollaborationGraph,
    nodes: Vec<NodeAttributes>,
    edges: Vec<AnnotatedEdge>,
    ranking: Vec<CommunityRank>,
}

impl<'g> AnnotatedGraph<'g> {
    pub fn graph(&self) -> &'g CollaborationGraph {
        self.graph
    }

    pub fn node(&self, id: PersonId) -> Option<&NodeAttributes> {
        self.nodes.get(id.index())
    }

    /// Attributes looked up by normalized name
    pub fn node_by_name(&self, name: &str) -> Option<&NodeAttributes> {
        self.node(self.graph.node_id(name)?)
    }

    /// `(person, name, attributes)` in id order
    pub fn nodes(&self) -> impl Iterator<Item = (PersonId, &str, &NodeAttributes)> + '_ {
        self.graph
            .nodes()
            .zip(self.nodes.iter())
            .map(|((id, name), attrs)| (id, name, attrs))
    }

    /// Edges ordered by (source, target) id
    pub fn edges(&self) -> &[AnnotatedEdge] {
        &self.edges
    }

    /// Communities from largest to smallest
    pub fn ranking(&self) -> &[CommunityRank] {
        &self.ranking
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Applies one validated [`AnnotationConfig`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotator {
    config: AnnotationConfig,
}

impl Annotator {
    pub fn new(config: AnnotationConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    /// Rank communities by member count, largest first; ties go to the lower id.
    ///
    /// The first `palette.len()` ranks take palette colors in order, the rest
    /// the fallback color. Empty community ids are left out.
    pub fn rank_communities(&self, partition: &Partition) -> Vec<CommunityRank> {
        let mut sizes: Vec<(usize, usize)> = partition
            .community_sizes()
            .into_iter()
            .enumerate()
            .filter(|&(_, members)| members > 0)
            .collect();
        sizes.sort_by_key(|&(community, members)| (Reverse(members), community));

        sizes
            .into_iter()
            .enumerate()
            .map(|(rank, (community, members))| CommunityRank {
                rank,
                community,
                members,
                color: self
                    .config
                    .palette
                    .get(rank)
                    .unwrap_or(&self.config.fallback_color)
                    .clone(),
            })
            .collect()
    }

    /// Derive node and edge attributes.
    ///
    /// The partition must cover exactly the graph's people.
    pub fn annotate<'g>(
        &self,
        graph: &'g CollaborationGraph,
        partition: &Partition,
    ) -> Result<AnnotatedGraph<'g>, AnnotateError> {
        if partition.len() != graph.node_count() {
            return Err(AnnotateError::PartitionMismatch {
                graph: graph.node_count(),
                partition: partition.len(),
            });
        }

        let ranking = self.rank_communities(partition);
        let mut community_color = vec![self.config.fallback_color.as_str(); partition.community_count()];
        for entry in &ranking {
            community_color[entry.community] = entry.color.as_str();
        }

        let nodes = partition
            .iter()
            .map(|(id, community)| {
                let weighted_degree = graph.weighted_degree(id);
                NodeAttributes {
                    weighted_degree,
                    community,
                    size: self.config.node_size(weighted_degree),
                    color: community_color[community].to_string(),
                }
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .map(|edge| AnnotatedEdge {
                edge,
                width: self.config.edge_width(edge.weight),
            })
            .collect();

        Ok(AnnotatedGraph {
            graph,
            nodes,
            edges,
            ranking,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::record::SongRecord;

    fn small_graph() -> CollaborationGraph {
        let records = vec![
            SongRecord::new(1970, Some("A"), Some("B"), Some("C")),
            SongRecord::new(1971, Some("A"), Some("B"), None),
            SongRecord::new(1972, None, None, Some("Solo")),
        ];
        GraphBuilder::default().build(&records).graph
    }

    #[test]
    fn test_sizes_and_widths() {
        let graph = small_graph();
        let partition = Partition::new(vec![0, 0, 0, 1]);
        let annotated = Annotator::default().annotate(&graph, &partition).unwrap();

        // A: A-B (2) + A-C (1)
        let a = annotated.node_by_name("A").unwrap();
        assert_eq!(a.weighted_degree, 3);
        assert_eq!(a.size, 5.0 + 2.0 * 3.0);

        let solo = annotated.node_by_name("Solo").unwrap();
        assert_eq!(solo.weighted_degree, 0);
        assert_eq!(solo.size, 5.0);

        let ab = annotated
            .edges()
            .iter()
            .find(|e| e.edge.weight == 2)
            .unwrap();
        assert_eq!(ab.width, 2.0);
    }

    #[test]
    fn test_custom_width_divisor() {
        let graph = small_graph();
        let partition = Partition::new(vec![0, 0, 0, 1]);
        let config = AnnotationConfig { width_divisor: 2.0, ..Default::default() };
        let annotated = Annotator::new(config).unwrap().annotate(&graph, &partition).unwrap();
        let widths: Vec<f64> = annotated.edges().iter().map(|e| e.width).collect();
        assert_eq!(widths, vec![1.0, 0.5, 0.5]);
    }

    #[test]
    fn test_colors_follow_rank() {
        let graph = small_graph();
        // Community 1 holds three people, community 0 only Solo
        let partition = Partition::new(vec![1, 1, 1, 0]);
        let annotated = Annotator::default().annotate(&graph, &partition).unwrap();

        assert_eq!(annotated.ranking()[0].community, 1);
        assert_eq!(annotated.ranking()[0].members, 3);
        assert_eq!(annotated.node_by_name("A").unwrap().color, TABLEAU_PALETTE[0]);
        assert_eq!(annotated.node_by_name("Solo").unwrap().color, TABLEAU_PALETTE[1]);
    }

    #[test]
    fn test_palette_overflow_uses_fallback() {
        // 15 communities; community c has 15 - c members
        let assignment: Vec<usize> = (0..15).flat_map(|c| std::iter::repeat(c).take(15 - c)).collect();
        let partition = Partition::new(assignment);
        let ranking = Annotator::default().rank_communities(&partition);

        assert_eq!(ranking.len(), 15);
        for (rank, entry) in ranking.iter().enumerate() {
            assert_eq!(entry.community, rank);
            if rank < 10 {
                assert_eq!(entry.color, TABLEAU_PALETTE[rank]);
            } else {
                assert_eq!(entry.color, DEFAULT_FALLBACK_COLOR);
            }
        }
    }

    #[test]
    fn test_rank_ties_prefer_lower_id() {
        let partition = Partition::new(vec![2, 2, 0, 1, 1]);
        let ranking = Annotator::default().rank_communities(&partition);
        let order: Vec<usize> = ranking.iter().map(|r| r.community).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_partition_mismatch() {
        let graph = small_graph();
        let partition = Partition::new(vec![0, 0]);
        let err = Annotator::default().annotate(&graph, &partition).unwrap_err();
        assert_eq!(err, AnnotateError::PartitionMismatch { graph: 4, partition: 2 });
    }

    #[test]
    fn test_empty_graph() {
        let graph = CollaborationGraph::new();
        let annotated = Annotator::default()
            .annotate(&graph, &Partition::new(Vec::new()))
            .unwrap();
        assert!(annotated.is_empty());
        assert!(annotated.edges().is_empty());
        assert!(annotated.ranking().is_empty());
    }

    #[test]
    fn test_invalid_configs() {
        let bad_size = AnnotationConfig { base_size: -1.0, ..Default::default() };
        assert_eq!(
            bad_size.validate(),
            Err(ConfigError::InvalidSizeConstant { name: "base_size", value: -1.0 })
        );

        let bad_width = AnnotationConfig { width_divisor: 0.0, ..Default::default() };
        assert_eq!(bad_width.validate(), Err(ConfigError::InvalidWidthDivisor(0.0)));

        let duplicate = AnnotationConfig {
            palette: vec!["#FF0000".into(), "#ff0000".into()],
            ..Default::default()
        };
        assert!(matches!(duplicate.validate(), Err(ConfigError::DuplicatePaletteColor(_))));

        let blank = AnnotationConfig { palette: vec!["red".into(), " ".into()], ..Default::default() };
        assert_eq!(blank.validate(), Err(ConfigError::BlankPaletteColor(1)));

        let clash = AnnotationConfig { fallback_color: "#1F77B4".into(), ..Default::default() };
        assert!(matches!(clash.validate(), Err(ConfigError::InvalidFallbackColor(_))));

        assert!(Annotator::new(AnnotationConfig::default()).is_ok());
    }
}
