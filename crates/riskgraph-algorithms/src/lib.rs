//! Topology-only algorithms for the RiskGraph engine.
//!
//! Everything here works on a dense [`GraphView`]; mapping to domain
//! identities happens in the `riskgraph` crate.

pub mod common;
pub mod centrality;
pub mod pagerank;
pub mod pathfinding;
pub mod linkpred;
pub mod walk;
pub mod skipgram;

pub use common::{GraphView, NodeId};
pub use centrality::{centrality, betweenness_centrality, closeness_centrality, degree_centrality, CentralityScores};
pub use pagerank::{page_rank_scores, PageRankConfig};
pub use pathfinding::bfs_distances;
pub use linkpred::adamic_adar;
pub use walk::{random_walks, WalkConfig};
pub use skipgram::{cosine_similarity, train as train_skipgram, SkipGramConfig, SkipGramModel};
