//! RiskGraph
//!
//! Equipment-risk analytics over a knowledge graph of telemetry facts.
//!
//! # Pipeline
//!
//! - Threshold resolution and severity classification of metric readings
//! - Directed knowledge graph built from (subject, predicate, object) facts
//! - Degree, betweenness, closeness and PageRank per node
//! - node2vec walks + skip-gram embeddings, ranked by pairwise cosine similarity
//! - Top-risk list and per-location grouping of elevated facts
//!
//! Topology algorithms live in the `riskgraph-algorithms` crate; this crate
//! maps domain records onto it.
//!
//! ## Example Usage
//!
//! ```rust
//! use riskgraph::{standard_thresholds, Fact, RiskConfig, RiskEngine, Severity};
//!
//! let mut config = RiskConfig::default();
//! config.embedding.num_walks = 10;
//!
//! let engine = RiskEngine::new(config).unwrap();
//! let facts = vec![
//!     Fact::metric_reading("ENG-27", "engine_oil_temp_c", 112.0, "C").with_location("PAD-B"),
//!     Fact::metric_reading("ENG-34", "engine_oil_pressure_psi", 71.0, "psi").with_location("PAD-C"),
//! ];
//! let report = engine.analyze(facts, &standard_thresholds(), &[]).unwrap();
//!
//! assert_eq!(report.top_risk_nodes[0].severity, Some(Severity::High));
//! assert!(report.location_risk_groups.contains_key("PAD-B"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod classify;
pub mod config;
pub mod embed;
pub mod graph;
pub mod model;
pub mod persistence;
pub mod pipeline;
pub mod report;

// Re-export main types for convenience
pub use model::{
    infer_equipment_type, predicates, standard_thresholds, Equipment, Fact, Severity, SeverityWeights,
    Threshold,
};

pub use classify::{annotate, classify, resolve, AnnotateOptions, ClassifyError, ClassifyResult};

pub use graph::{Edge, GraphError, GraphResult, KnowledgeGraph, Node};

pub use algo::{compute_centrality, predict_links, LinkPrediction, NodeScores};

pub use embed::{embed, embed_and_rank, rank_similar_pairs, EmbeddingConfig, NodeEmbeddings, SimilarPair};

pub use report::{aggregate, rank_top_risk, LocationRiskFact, ReportSummary, RiskNode, RiskReport};

pub use config::{ConfigError, ConfigResult, RiskConfig};

pub use persistence::{FactRepository, InMemoryRepository, JsonRepository, RepositoryError, RepositoryResult};

pub use pipeline::{RiskEngine, RiskError, RiskResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
