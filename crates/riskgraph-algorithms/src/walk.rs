//! node2vec random walks
//!
//! Walks run on the undirected view. Each walk owns an RNG seeded from
//! `(seed, round, start)`, so the corpus is identical for any thread count.

use super::common::GraphView;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Random walk configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct WalkConfig {
    /// Nodes per walk, including the start node
    pub walk_length: usize,
    /// Walks started from every non-isolated node
    pub num_walks: usize,
    /// Return parameter: weight `1/p` for stepping back to the previous node
    pub p: f64,
    /// In-out parameter: weight `1/q` for moving away from the previous node
    pub q: f64,
    pub seed: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            walk_length: 10,
            num_walks: 100,
            p: 1.0,
            q: 1.0,
            seed: 42,
        }
    }
}

/// SplitMix64 finaliser used to derive independent per-walk seeds
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn walk_seed(seed: u64, round: usize, start: usize) -> u64 {
    mix(mix(seed ^ round as u64).wrapping_add(start as u64))
}

/// Generate the walk corpus.
///
/// Isolated nodes start no walks and never appear in one. Within a round the
/// start nodes are visited in a seeded shuffled order.
pub fn random_walks(view: &GraphView, config: &WalkConfig) -> Vec<Vec<usize>> {
    if config.walk_length == 0 || config.num_walks == 0 {
        return Vec::new();
    }

    let starts: Vec<usize> = (0..view.node_count)
        .filter(|&i| view.undirected_degree(i) > 0)
        .collect();
    if starts.is_empty() {
        return Vec::new();
    }

    let mut jobs = Vec::with_capacity(starts.len() * config.num_walks);
    for round in 0..config.num_walks {
        let mut order = starts.clone();
        let mut rng = StdRng::seed_from_u64(mix(config.seed ^ (round as u64).rotate_left(32)));
        order.shuffle(&mut rng);
        jobs.extend(order.into_iter().map(|start| (round, start)));
    }

    jobs.par_iter()
        .map(|&(round, start)| {
            let mut rng = StdRng::seed_from_u64(walk_seed(config.seed, round, start));
            single_walk(view, start, config, &mut rng)
        })
        .collect()
}

fn single_walk(view: &GraphView, start: usize, config: &WalkConfig, rng: &mut StdRng) -> Vec<usize> {
    let mut walk = Vec::with_capacity(config.walk_length);
    walk.push(start);
    let uniform = config.p == 1.0 && config.q == 1.0;

    while walk.len() < config.walk_length {
        let current = walk[walk.len() - 1];
        let neighbors = view.neighbors(current);
        if neighbors.is_empty() {
            break;
        }

        let next = match (uniform, walk.len()) {
            (true, _) | (false, 1) => neighbors[rng.gen_range(0..neighbors.len())],
            (false, len) => biased_step(view, walk[len - 2], neighbors, config, rng),
        };
        walk.push(next);
    }

    walk
}

/// Second-order node2vec transition from `current` given the previous node
fn biased_step(
    view: &GraphView,
    previous: usize,
    neighbors: &[usize],
    config: &WalkConfig,
    rng: &mut StdRng,
) -> usize {
    let weights: Vec<f64> = neighbors
        .iter()
        .map(|&x| {
            if x == previous {
                1.0 / config.p
            } else if view.is_adjacent(previous, x) {
                1.0
            } else {
                1.0 / config.q
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    let mut target = rng.gen::<f64>() * total;
    for (&x, &w) in neighbors.iter().zip(&weights) {
        if target < w {
            return x;
        }
        target -= w;
    }
    neighbors[neighbors.len() - 1]
}
