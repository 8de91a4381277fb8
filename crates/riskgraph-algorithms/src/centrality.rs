//! Centrality algorithms: degree, betweenness (Brandes) and closeness
//!
//! All scores are computed on the directed view. Results are indexed by dense
//! node index so callers can zip them with `GraphView::index_to_node`.

use super::common::GraphView;
use super::pathfinding::bfs_distances;
use rayon::prelude::*;
use std::collections::VecDeque;

/// Sources per betweenness work unit. Fixed so the reduction order does not
/// depend on the size of the thread pool.
const BETWEENNESS_CHUNK: usize = 32;

/// Per-node centrality triple, indexed by dense node index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentralityScores {
    pub degree: Vec<f64>,
    pub betweenness: Vec<f64>,
    pub closeness: Vec<f64>,
}

/// Compute degree, betweenness and closeness for every node
pub fn centrality(view: &GraphView) -> CentralityScores {
    CentralityScores {
        degree: degree_centrality(view),
        betweenness: betweenness_centrality(view),
        closeness: closeness_centrality(view),
    }
}

/// Degree centrality normalised by `N - 1`.
///
/// Counts distinct adjacent nodes in either direction, so a reciprocal pair
/// `a -> b`, `b -> a` contributes one neighbour and the score stays in `[0, 1]`.
pub fn degree_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    if n <= 1 {
        return vec![0.0; n];
    }
    let norm = (n - 1) as f64;
    (0..n)
        .map(|i| view.undirected_degree(i) as f64 / norm)
        .collect()
}

/// Betweenness centrality for directed, unweighted graphs (Brandes 2001).
///
/// Normalised by `1 / ((N-1)(N-2))`; graphs with fewer than three nodes score zero.
pub fn betweenness_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    if n <= 2 {
        return vec![0.0; n];
    }

    let sources: Vec<usize> = (0..n).collect();
    let partials: Vec<Vec<f64>> = sources
        .par_chunks(BETWEENNESS_CHUNK)
        .map(|chunk| {
            let mut acc = vec![0.0; n];
            for &s in chunk {
                accumulate_dependencies(view, s, &mut acc);
            }
            acc
        })
        .collect();

    let mut scores = vec![0.0; n];
    for partial in partials {
        for (total, value) in scores.iter_mut().zip(partial) {
            *total += value;
        }
    }

    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    for value in scores.iter_mut() {
        *value *= scale;
    }
    scores
}

/// Single-source shortest paths plus back-propagation of pair dependencies
fn accumulate_dependencies(view: &GraphView, s: usize, acc: &mut [f64]) {
    let n = view.node_count;
    let mut stack = Vec::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut queue = VecDeque::new();

    sigma[s] = 1.0;
    dist[s] = 0;
    queue.push_back(s);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &w in view.successors(v) {
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                preds[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0f64; n];
    while let Some(w) = stack.pop() {
        for &v in &preds[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != s {
            acc[w] += delta[w];
        }
    }
}

/// Closeness centrality over each node's own reachable set.
///
/// `(r - 1) / sum(d)` where `r` counts the node itself plus every node reachable
/// along outgoing edges. Nodes that reach nothing score zero.
pub fn closeness_centrality(view: &GraphView) -> Vec<f64> {
    (0..view.node_count)
        .into_par_iter()
        .map(|i| {
            let dist = bfs_distances(view, i);
            let (reachable, total) = dist
                .iter()
                .flatten()
                .fold((0usize, 0usize), |(r, t), &d| (r + 1, t + d));
            if total == 0 {
                0.0
            } else {
                (reachable - 1) as f64 / total as f64
            }
        })
        .collect()
}
