//! Modularity of a node partition

use super::common::GraphView;

/// Newman-Girvan modularity of `assignment` over `view`, with resolution `gamma`.
///
/// `assignment[i]` is the community of the node at dense index `i`. Community
/// ids need not be contiguous but should be small, since per-community
/// accumulators are indexed by id.
///
/// ```text
/// Q = sum_c [ in_c / 2m  -  gamma * (tot_c / 2m)^2 ]
/// ```
///
/// where `in_c` counts every internal edge from both endpoints (self-loops
/// twice) and `tot_c` is the summed weighted degree of the members.
/// Returns 0.0 for a graph with no weight.
pub fn modularity(view: &GraphView, assignment: &[usize], resolution: f64) -> f64 {
    let m2 = 2.0 * view.total_weight();
    if m2 == 0.0 {
        return 0.0;
    }

    let slots = assignment.iter().copied().max().map_or(0, |c| c + 1);
    let mut internal = vec![0.0; slots];
    let mut total = vec![0.0; slots];

    for u in 0..view.node_count {
        let cu = assignment[u];
        total[cu] += view.weighted_degree(u);
        internal[cu] += 2.0 * view.self_loops[u];
        for (v, w) in view.edges(u) {
            if assignment[v] == cu {
                internal[cu] += w;
            }
        }
    }

    internal
        .iter()
        .zip(total.iter())
        .map(|(&inside, &tot)| inside / m2 - resolution * (tot / m2) * (tot / m2))
        .sum()
}
