//! Unweighted shortest-path distances

use super::common::GraphView;
use std::collections::VecDeque;

/// Breadth-First Search hop distances from `source` (by index), following
/// edges source -> target.
///
/// Unreachable nodes are `None`; the source itself is `Some(0)`.
pub fn bfs_distances(view: &GraphView, source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; view.node_count];
    if source >= view.node_count {
        return dist;
    }

    let mut queue = VecDeque::new();
    dist[source] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let d = dist[current].unwrap_or(0);
        for &n in view.successors(current) {
            if dist[n].is_none() {
                dist[n] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }

    dist
}
