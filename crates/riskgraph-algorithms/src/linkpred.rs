//! Link prediction on the undirected view

use super::common::GraphView;
use std::collections::BTreeMap;

/// Adamic-Adar scores for candidate links from `node` (by index).
///
/// Candidates are two hops away and not already adjacent. Each shared
/// neighbour `z` contributes `1 / ln(deg(z))`, or `1` when `deg(z) == 1`.
/// Scores are divided by the maximum and sorted descending, ties by index.
pub fn adamic_adar(view: &GraphView, node: usize) -> Vec<(usize, f64)> {
    if node >= view.node_count {
        return Vec::new();
    }

    let mut raw: BTreeMap<usize, f64> = BTreeMap::new();
    for &z in view.neighbors(node) {
        let deg = view.undirected_degree(z);
        let weight = if deg > 1 { 1.0 / (deg as f64).ln() } else { 1.0 };
        for &candidate in view.neighbors(z) {
            if candidate == node || view.is_adjacent(node, candidate) {
                continue;
            }
            *raw.entry(candidate).or_insert(0.0) += weight;
        }
    }

    let max = raw.values().copied().fold(0.0f64, f64::max);
    if max <= 0.0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f64)> = raw.into_iter().map(|(idx, s)| (idx, s / max)).collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored
}
