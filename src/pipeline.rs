//! End-to-end risk analysis
//!
//! annotate -> build graph -> {centrality, embedding + similarity} -> rank -> aggregate

use crate::algo::compute_centrality;
use crate::classify::annotate;
use crate::config::{ConfigError, RiskConfig};
use crate::embed::embed_and_rank;
use crate::graph::{GraphError, KnowledgeGraph};
use crate::model::{Equipment, Fact, Threshold};
use crate::persistence::{FactRepository, RepositoryError};
use crate::report::{aggregate, rank_top_risk, RiskReport};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Fatal pipeline errors; recoverable conditions only shrink the report
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RiskResult<T> = Result<T, RiskError>;

/// Batch risk engine; holds no state between runs besides its config
#[derive(Debug)]
pub struct RiskEngine {
    config: RiskConfig,
    pool: Option<ThreadPool>,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> RiskResult<Self> {
        config.validate()?;
        let pool = match config.workers {
            Some(threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("riskgraph-worker-{i}"))
                    .build()?,
            ),
            None => None,
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Load one snapshot from `repository` and analyse it
    pub fn run(&self, repository: &dyn FactRepository) -> RiskResult<RiskReport> {
        let facts = repository.load_facts()?;
        let thresholds = repository.load_thresholds()?;
        let equipment = repository.load_equipment()?;
        info!(
            facts = facts.len(),
            thresholds = thresholds.len(),
            equipment = equipment.len(),
            "Loaded snapshot"
        );
        self.analyze(facts, &thresholds, &equipment)
    }

    pub fn analyze(&self, facts: Vec<Fact>, thresholds: &[Threshold], equipment: &[Equipment]) -> RiskResult<RiskReport> {
        match &self.pool {
            Some(pool) => pool.install(|| self.analyze_in_pool(facts, thresholds, equipment)),
            None => self.analyze_in_pool(facts, thresholds, equipment),
        }
    }

    /// Annotate facts and fold them into the knowledge graph.
    ///
    /// Identities are checked before annotation, so a `MalformedFact` index
    /// points into the caller's `facts`.
    pub fn build_graph(
        &self,
        facts: Vec<Fact>,
        thresholds: &[Threshold],
        equipment: &[Equipment],
    ) -> RiskResult<(Vec<Fact>, KnowledgeGraph)> {
        KnowledgeGraph::validate(&facts)?;
        let annotated = annotate(facts, thresholds, equipment, &self.config.annotate_options());
        let graph = KnowledgeGraph::build(&annotated.facts)?;
        Ok((annotated.facts, graph))
    }

    fn analyze_in_pool(&self, facts: Vec<Fact>, thresholds: &[Threshold], equipment: &[Equipment]) -> RiskResult<RiskReport> {
        let started = Instant::now();
        let (facts, graph) = self.build_graph(facts, thresholds, equipment)?;
        let view = graph.view();

        let (scores, pairs) = rayon::join(
            || compute_centrality(&view, self.config.pagerank),
            || embed_and_rank(&graph, &view, &self.config.embedding, self.config.top_k_pairs),
        );
        debug!(scored = scores.len(), pairs = pairs.len(), "Structural stages complete");

        let top = rank_top_risk(&graph, &scores, &self.config.severity_weights, self.config.top_k_nodes);
        let report = aggregate(&facts, top, pairs);

        let summary = report.summary();
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            risk_nodes = summary.risk_nodes,
            similar_pairs = summary.similar_pairs,
            locations = summary.locations,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Risk analysis complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{predicates, Severity};

    fn quick_config() -> RiskConfig {
        let mut config = RiskConfig::default();
        config.embedding.dimensions = 8;
        config.embedding.num_walks = 10;
        config.embedding.epochs = 2;
        config
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = quick_config();
        config.embedding.dimensions = 0;
        assert!(matches!(RiskEngine::new(config), Err(RiskError::Config(_))));
    }

    #[test]
    fn test_malformed_fact_is_fatal() {
        let engine = RiskEngine::new(quick_config()).unwrap();
        let facts = vec![Fact::new("", "component", predicates::LOCATED_AT, "PAD-A", "pad")];
        let err = engine.analyze(facts, &[], &[]).unwrap_err();
        assert!(matches!(err, RiskError::Graph(GraphError::MalformedFact { index: 0, .. })));
    }

    #[test]
    fn test_malformed_fact_index_ignores_derived_symptoms() {
        let engine = RiskEngine::new(quick_config()).unwrap();
        let thresholds = crate::model::standard_thresholds();
        let facts = vec![
            Fact::metric_reading("ENG-34", "engine_oil_temp_c", 129.0, "°C"),
            Fact::new("ENG-34", "component", predicates::LOCATED_AT, " ", "pad"),
        ];
        let err = engine.analyze(facts, &thresholds, &[]).unwrap_err();
        assert!(matches!(err, RiskError::Graph(GraphError::MalformedFact { index: 1, .. })));
    }

    #[test]
    fn test_dedicated_pool_matches_global_pool() {
        let facts = vec![
            Fact::new("ENG-12", "component", predicates::LOCATED_AT, "PAD-A", "pad"),
            Fact::new("TRANS-12", "component", predicates::LOCATED_AT, "PAD-A", "pad"),
            Fact::new("ENG-12", "component", predicates::HAS_SYMPTOM, "Overheating", "symptom")
                .with_severity(Severity::High)
                .with_location("PAD-A"),
        ];
        let global = RiskEngine::new(quick_config()).unwrap();
        let mut pooled_config = quick_config();
        pooled_config.workers = Some(2);
        let pooled = RiskEngine::new(pooled_config).unwrap();

        let a = global.analyze(facts.clone(), &[], &[]).unwrap();
        let b = pooled.analyze(facts, &[], &[]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.top_risk_nodes[0].node_id, "ENG-12");
        assert_eq!(a.location_risk_groups["PAD-A"].len(), 1);
    }
}
