//! PageRank over the directed view

use super::common::GraphView;

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Maximum number of iterations
    pub iterations: usize,
    /// Stop early once the L1 change between iterations drops below this
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            iterations: 20,
            tolerance: 0.0001,
        }
    }
}

/// Unnormalised PageRank: `score(v) = (1 - d) + d * sum(score(u) / out(u))`.
///
/// Every score starts at 1.0; the result is indexed by dense node index.
pub fn page_rank_scores(view: &GraphView, config: PageRankConfig) -> Vec<f64> {
    let n = view.node_count;
    if n == 0 {
        return Vec::new();
    }

    let mut scores = vec![1.0; n];
    let mut next_scores = vec![0.0; n];
    let d = config.damping_factor;
    let base_score = 1.0 - d;

    for _ in 0..config.iterations {
        let mut total_diff = 0.0;

        for i in 0..n {
            let sum_incoming: f64 = view
                .predecessors(i)
                .iter()
                .map(|&src| scores[src] / view.out_degree(src) as f64)
                .sum();

            next_scores[i] = base_score + d * sum_incoming;
            total_diff += (next_scores[i] - scores[i]).abs();
        }

        scores.copy_from_slice(&next_scores);

        if total_diff < config.tolerance {
            break;
        }
    }

    scores
}
