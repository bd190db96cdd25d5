//! Community detection algorithms
//!
//! Louvain modularity optimization (Blondel et al. 2008): local node moves
//! followed by aggregation of each community into one coarse node, repeated
//! until modularity stops improving.
//!
//! The traversal order and every tie-break are fixed, so identical input and
//! configuration always produce the identical partition.

use super::common::{GraphView, NodeId};
use super::modularity::modularity;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Gains closer than this are treated as equal
const GAIN_EPSILON: f64 = 1e-10;

/// Errors for invalid detector settings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LouvainError {
    #[error("resolution must be finite and positive, got {0}")]
    InvalidResolution(f64),

    #[error("max_passes must be at least 1")]
    ZeroPasses,

    #[error("max_levels must be at least 1")]
    ZeroLevels,

    #[error("min_modularity_gain must be finite and non-negative, got {0}")]
    InvalidMinGain(f64),
}

/// Louvain configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LouvainConfig {
    /// Resolution parameter (gamma). Higher values favour smaller communities.
    pub resolution: f64,
    /// Maximum local-moving passes per level
    pub max_passes: usize,
    /// Maximum aggregation levels
    pub max_levels: usize,
    /// Minimum modularity improvement for a level to be kept
    pub min_modularity_gain: f64,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_passes: 100,
            max_levels: 10,
            min_modularity_gain: 1e-7,
        }
    }
}

impl LouvainConfig {
    /// Check every setting, reporting the first invalid one
    pub fn validate(&self) -> Result<(), LouvainError> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(LouvainError::InvalidResolution(self.resolution));
        }
        if self.max_passes == 0 {
            return Err(LouvainError::ZeroPasses);
        }
        if self.max_levels == 0 {
            return Err(LouvainError::ZeroLevels);
        }
        if !self.min_modularity_gain.is_finite() || self.min_modularity_gain < 0.0 {
            return Err(LouvainError::InvalidMinGain(self.min_modularity_gain));
        }
        Ok(())
    }
}

/// Result of the Louvain algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct LouvainResult {
    /// Map of NodeId -> Community ID
    pub node_community: HashMap<NodeId, usize>,
    /// Community ID -> member NodeIds, in view order
    pub communities: Vec<Vec<NodeId>>,
    /// Modularity of the final partition
    pub modularity: f64,
    /// Number of aggregation levels that were kept
    pub levels: usize,
}

impl LouvainResult {
    /// Number of communities found
    pub fn community_count(&self) -> usize {
        self.communities.len()
    }
}

/// Louvain community detection.
///
/// Nodes are scanned in ascending view index on every pass, so callers that
/// want a name-ordered traversal build the view in name order. Community ids
/// in the result are `0..k`, numbered by the first member in view order.
///
/// Settings are not re-checked here; callers holding untrusted settings run
/// [`LouvainConfig::validate`] first.
pub fn louvain(view: &GraphView, config: &LouvainConfig) -> LouvainResult {
    let n = view.node_count;
    if n == 0 {
        return LouvainResult {
            node_community: HashMap::new(),
            communities: Vec::new(),
            modularity: 0.0,
            levels: 0,
        };
    }

    // membership[i]: node of the current (coarse) level that original node i belongs to
    let mut membership: Vec<usize> = (0..n).collect();
    let mut best_modularity = modularity(view, &membership, config.resolution);
    let mut coarse: Option<GraphView> = None;
    let mut levels = 0;

    for _level in 0..config.max_levels {
        let current = coarse.as_ref().unwrap_or(view);

        // Phase 1: local moving
        let (assignment, moved) = local_moving(current, config);
        if !moved {
            break;
        }
        let (assignment, community_count) = renumber(&assignment);

        let q = modularity(current, &assignment, config.resolution);
        if q - best_modularity < config.min_modularity_gain {
            break;
        }
        best_modularity = q;
        for slot in membership.iter_mut() {
            *slot = assignment[*slot];
        }
        levels += 1;

        if community_count == 1 {
            break;
        }

        // Phase 2: aggregation
        let next = aggregate(current, &assignment, community_count);
        coarse = Some(next);
    }

    let (membership, community_count) = renumber(&membership);

    let mut communities: Vec<Vec<NodeId>> = vec![Vec::new(); community_count];
    let mut node_community = HashMap::with_capacity(n);
    for (idx, &community) in membership.iter().enumerate() {
        let node_id = view.index_to_node[idx];
        communities[community].push(node_id);
        node_community.insert(node_id, community);
    }

    LouvainResult {
        node_community,
        communities,
        modularity: best_modularity,
        levels,
    }
}

/// Phase 1: move nodes between neighboring communities until no move improves modularity.
/// Returns (community per node, whether any node moved).
fn local_moving(view: &GraphView, config: &LouvainConfig) -> (Vec<usize>, bool) {
    let n = view.node_count;
    let mut communities: Vec<usize> = (0..n).collect();

    let m2 = 2.0 * view.total_weight();
    if m2 == 0.0 {
        return (communities, false);
    }

    let degrees: Vec<f64> = (0..n).map(|i| view.weighted_degree(i)).collect();
    let mut community_totals = degrees.clone();

    // Scratch space indexed by community id, reset after each node
    let mut link_weight = vec![0.0; n];
    let mut seen = vec![false; n];
    let mut touched: Vec<usize> = Vec::new();

    let gamma = config.resolution;
    let mut any_moved = false;

    for _pass in 0..config.max_passes {
        let mut moved = false;

        for node in 0..n {
            let current = communities[node];
            let ki = degrees[node];

            for (neighbor, w) in view.edges(node) {
                let c = communities[neighbor];
                if !seen[c] {
                    seen[c] = true;
                    touched.push(c);
                }
                link_weight[c] += w;
            }

            // Take the node out of its community before scoring
            community_totals[current] -= ki;

            let gain = |c: usize| link_weight[c] - gamma * community_totals[c] * ki / m2;
            let stay_gain = gain(current);

            // Ascending scan: the first of several equal gains is the lowest id
            touched.sort_unstable();
            let mut candidate = current;
            let mut candidate_gain = f64::NEG_INFINITY;
            for &c in &touched {
                if c == current {
                    continue;
                }
                let g = gain(c);
                if g > candidate_gain + GAIN_EPSILON {
                    candidate = c;
                    candidate_gain = g;
                }
            }

            let target = if candidate != current && candidate_gain > stay_gain + GAIN_EPSILON {
                candidate
            } else {
                current
            };

            community_totals[target] += ki;
            if target != current {
                communities[node] = target;
                moved = true;
            }

            for &c in &touched {
                link_weight[c] = 0.0;
                seen[c] = false;
            }
            touched.clear();
        }

        if !moved {
            break;
        }
        any_moved = true;
    }

    (communities, any_moved)
}

/// Relabel communities as `0..k` in order of first appearance.
fn renumber(assignment: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    let relabeled = assignment
        .iter()
        .map(|&c| {
            let next = mapping.len();
            *mapping.entry(c).or_insert(next)
        })
        .collect();
    (relabeled, mapping.len())
}

/// Phase 2: collapse every community into one node.
///
/// Inter-community weights are summed into coarse edges; intra-community
/// weight (and existing self-loops) becomes the coarse node's self-loop.
fn aggregate(view: &GraphView, assignment: &[usize], community_count: usize) -> GraphView {
    let mut self_loops = vec![0.0; community_count];
    let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();

    for u in 0..view.node_count {
        let cu = assignment[u];
        self_loops[cu] += view.self_loops[u];

        for (v, w) in view.edges(u) {
            // Each undirected edge is stored twice; take it from the lower endpoint
            if v < u {
                continue;
            }
            let cv = assignment[v];
            if cu == cv {
                self_loops[cu] += w;
            } else {
                let key = if cu < cv { (cu, cv) } else { (cv, cu) };
                *between.entry(key).or_insert(0.0) += w;
            }
        }
    }

    let mut edges: Vec<(usize, usize, f64)> = between
        .into_iter()
        .map(|((a, b), w)| (a, b, w))
        .collect();
    edges.extend(
        self_loops
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w > 0.0)
            .map(|(c, &w)| (c, c, w)),
    );

    GraphView::from_edges((0..community_count as NodeId).collect(), &edges)
}
