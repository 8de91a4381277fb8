//! Skip-gram with negative sampling over a walk corpus
//!
//! Tokens are dense node indices. Training is sequential and driven by one
//! seeded RNG so the learned vectors are reproducible.

use ndarray::{Array1, Array2, ArrayView1};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Skip-gram training configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SkipGramConfig {
    /// Embedding dimensionality
    pub dimensions: usize,
    /// Maximum distance between a token and its context
    pub window: usize,
    /// Negative samples per positive pair
    pub negative: usize,
    /// Passes over the corpus
    pub epochs: usize,
    /// Initial learning rate, decayed linearly to `min_learning_rate`
    pub learning_rate: f32,
    pub min_learning_rate: f32,
    pub seed: u64,
}

impl Default for SkipGramConfig {
    fn default() -> Self {
        Self {
            dimensions: 32,
            window: 5,
            negative: 5,
            epochs: 5,
            learning_rate: 0.025,
            min_learning_rate: 0.0001,
            seed: 42,
        }
    }
}

/// Learned input vectors, one row per token
#[derive(Debug, Clone)]
pub struct SkipGramModel {
    pub vectors: Array2<f32>,
    /// `seen[i]` is false for tokens absent from the corpus; their rows are meaningless
    pub seen: Vec<bool>,
}

impl SkipGramModel {
    /// Vector for a token that occurred in the corpus
    pub fn vector(&self, token: usize) -> Option<ArrayView1<'_, f32>> {
        if *self.seen.get(token)? {
            Some(self.vectors.row(token))
        } else {
            None
        }
    }

    pub fn seen_count(&self) -> usize {
        self.seen.iter().filter(|&&s| s).count()
    }
}

/// Cumulative unigram^0.75 distribution for negative sampling
struct NoiseDistribution {
    tokens: Vec<usize>,
    cumulative: Vec<f64>,
}

impl NoiseDistribution {
    fn new(counts: &[u64]) -> Self {
        let mut tokens = Vec::new();
        let mut cumulative = Vec::new();
        let mut running = 0.0;
        for (token, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            running += (count as f64).powf(0.75);
            tokens.push(token);
            cumulative.push(running);
        }
        Self { tokens, cumulative }
    }

    fn sample(&self, rng: &mut StdRng) -> usize {
        let total = self.cumulative[self.cumulative.len() - 1];
        let target = rng.gen::<f64>() * total;
        let pos = self.cumulative.partition_point(|&c| c <= target);
        self.tokens[pos.min(self.tokens.len() - 1)]
    }
}

fn sigmoid(x: f32) -> f32 {
    if x > 6.0 {
        1.0
    } else if x < -6.0 {
        0.0
    } else {
        1.0 / (1.0 + (-x).exp())
    }
}

/// Train skip-gram vectors for `vocab_size` tokens from `walks`
pub fn train(walks: &[Vec<usize>], vocab_size: usize, config: &SkipGramConfig) -> SkipGramModel {
    let dim = config.dimensions.max(1);
    let mut counts = vec![0u64; vocab_size];
    for &token in walks.iter().flatten() {
        if token < vocab_size {
            counts[token] += 1;
        }
    }
    let seen: Vec<bool> = counts.iter().map(|&c| c > 0).collect();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let bound = 0.5 / dim as f32;
    let mut syn0 = Array2::from_shape_fn((vocab_size, dim), |_| rng.gen_range(-bound..bound));
    let mut syn1 = Array2::<f32>::zeros((vocab_size, dim));

    let total_tokens: u64 = counts.iter().sum();
    if total_tokens == 0 || config.epochs == 0 {
        return SkipGramModel { vectors: syn0, seen };
    }

    let noise = NoiseDistribution::new(&counts);
    let total_steps = (total_tokens * config.epochs as u64) as f32;
    let mut processed = 0u64;
    let mut grad = Array1::<f32>::zeros(dim);

    for _ in 0..config.epochs {
        for walk in walks {
            for (pos, &center) in walk.iter().enumerate() {
                if center >= vocab_size {
                    continue;
                }
                let progress = processed as f32 / total_steps;
                let lr = (config.learning_rate - (config.learning_rate - config.min_learning_rate) * progress)
                    .max(config.min_learning_rate);
                processed += 1;

                // Reduced window as in word2vec: sample an effective span in 1..=window
                let span = rng.gen_range(1..=config.window.max(1));
                let lo = pos.saturating_sub(span);
                let hi = (pos + span).min(walk.len() - 1);

                for ctx_pos in lo..=hi {
                    let context = walk[ctx_pos];
                    if ctx_pos == pos || context >= vocab_size {
                        continue;
                    }

                    grad.fill(0.0);
                    for k in 0..=config.negative {
                        let (target, label) = if k == 0 {
                            (center, 1.0)
                        } else {
                            let sampled = noise.sample(&mut rng);
                            if sampled == center {
                                continue;
                            }
                            (sampled, 0.0)
                        };

                        let f = syn0.row(context).dot(&syn1.row(target));
                        let g = (label - sigmoid(f)) * lr;
                        grad.scaled_add(g, &syn1.row(target));
                        syn1.row_mut(target).scaled_add(g, &syn0.row(context));
                    }
                    syn0.row_mut(context).scaled_add(1.0, &grad);
                }
            }
        }
    }

    SkipGramModel { vectors: syn0, seen }
}

/// Cosine similarity of two vectors; zero when either has zero norm
pub fn cosine_similarity(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}
