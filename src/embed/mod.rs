//! Structural node embeddings
//!
//! node2vec walks over the undirected graph feed a skip-gram model; every
//! node that appears in at least one walk gets a vector. Isolated nodes have
//! no embedding.

pub mod similarity;

pub use similarity::{rank_similar_pairs, SimilarPair};

use crate::graph::KnowledgeGraph;
use ndarray::ArrayView1;
use riskgraph_algorithms::{cosine_similarity, random_walks, train_skipgram, GraphView, SkipGramConfig, SkipGramModel, WalkConfig};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Walk and training parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub dimensions: usize,
    pub walk_length: usize,
    pub num_walks: usize,
    pub window: usize,
    /// node2vec return parameter
    pub p: f64,
    /// node2vec in-out parameter
    pub q: f64,
    pub negative: usize,
    pub epochs: usize,
    pub learning_rate: f32,
    pub min_learning_rate: f32,
    pub seed: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: 32,
            walk_length: 10,
            num_walks: 100,
            window: 5,
            p: 1.0,
            q: 1.0,
            negative: 5,
            epochs: 5,
            learning_rate: 0.025,
            min_learning_rate: 0.0001,
            seed: 42,
        }
    }
}

impl EmbeddingConfig {
    pub fn walk_config(&self) -> WalkConfig {
        WalkConfig {
            walk_length: self.walk_length,
            num_walks: self.num_walks,
            p: self.p,
            q: self.q,
            seed: self.seed,
        }
    }

    pub fn skipgram_config(&self) -> SkipGramConfig {
        SkipGramConfig {
            dimensions: self.dimensions,
            window: self.window,
            negative: self.negative,
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            min_learning_rate: self.min_learning_rate,
            seed: self.seed,
        }
    }
}

/// Learned vectors keyed by node id
#[derive(Debug, Clone)]
pub struct NodeEmbeddings {
    /// Node ids in graph first-seen order
    ids: Vec<String>,
    model: SkipGramModel,
}

impl NodeEmbeddings {
    pub fn dimensions(&self) -> usize {
        self.model.vectors.ncols()
    }

    /// Number of nodes with an embedding
    pub fn len(&self) -> usize {
        self.model.seen_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<ArrayView1<'_, f32>> {
        let idx = self.ids.iter().position(|n| n == id)?;
        self.model.vector(idx)
    }

    /// Cosine similarity of two embedded nodes
    pub fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        Some(cosine_similarity(self.get(a)?, self.get(b)?))
    }

    /// `(index, id)` of every embedded node in first-seen order
    pub(crate) fn embedded(&self) -> Vec<(usize, &str)> {
        self.ids
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.model.seen[*idx])
            .map(|(idx, id)| (idx, id.as_str()))
            .collect()
    }

    pub(crate) fn vector_at(&self, idx: usize) -> ArrayView1<'_, f32> {
        self.model.vectors.row(idx)
    }
}

/// Learn an embedding for every non-isolated node of `graph`
pub fn embed(graph: &KnowledgeGraph, view: &GraphView, config: &EmbeddingConfig) -> NodeEmbeddings {
    let started = Instant::now();
    let walks = random_walks(view, &config.walk_config());
    let model = train_skipgram(&walks, view.node_count, &config.skipgram_config());

    debug!(
        walks = walks.len(),
        embedded = model.seen_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Trained node embeddings"
    );

    NodeEmbeddings {
        ids: graph.nodes().map(|n| n.id.clone()).collect(),
        model,
    }
}

/// Embed `graph` and return its `top_k` most similar node pairs
pub fn embed_and_rank(graph: &KnowledgeGraph, view: &GraphView, config: &EmbeddingConfig, top_k: usize) -> Vec<SimilarPair> {
    rank_similar_pairs(&embed(graph, view, config), top_k)
}
