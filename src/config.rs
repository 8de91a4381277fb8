//! Engine configuration
//!
//! Every field has a default, so an empty YAML document is a valid config.

use crate::classify::AnnotateOptions;
use crate::embed::EmbeddingConfig;
use crate::model::{Severity, SeverityWeights};
use riskgraph_algorithms::PageRankConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for one engine run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub top_k_nodes: usize,
    pub top_k_pairs: usize,
    pub severity_weights: SeverityWeights,
    pub embedding: EmbeddingConfig,
    pub pagerank: PageRankConfig,
    /// Worker threads for the parallel stages; `None` uses the global pool
    pub workers: Option<usize>,
    /// Severity for readings no threshold applies to
    pub fallback_severity: Option<Severity>,
    pub emit_breach_symptoms: bool,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            top_k_nodes: 10,
            top_k_pairs: 10,
            severity_weights: SeverityWeights::default(),
            embedding: EmbeddingConfig::default(),
            pagerank: PageRankConfig::default(),
            workers: None,
            fallback_severity: None,
            emit_breach_symptoms: true,
        }
    }
}

impl RiskConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        // serde_yaml rejects an empty document; treat it as all defaults
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: RiskConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let e = &self.embedding;
        let zero = [
            ("embedding.dimensions", e.dimensions),
            ("embedding.walk_length", e.walk_length),
            ("embedding.window", e.window),
            ("embedding.epochs", e.epochs),
        ];
        if let Some((name, _)) = zero.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
        }
        if !(e.p > 0.0 && e.p.is_finite()) || !(e.q > 0.0 && e.q.is_finite()) {
            return Err(ConfigError::Invalid("embedding.p and embedding.q must be positive".into()));
        }
        if e.min_learning_rate > e.learning_rate {
            return Err(ConfigError::Invalid(
                "embedding.min_learning_rate exceeds embedding.learning_rate".into(),
            ));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::Invalid("workers must be greater than zero".into()));
        }
        if !(0.0..=1.0).contains(&self.pagerank.damping_factor) {
            return Err(ConfigError::Invalid("pagerank.damping_factor must be within [0, 1]".into()));
        }
        Ok(())
    }

    pub fn annotate_options(&self) -> AnnotateOptions {
        AnnotateOptions {
            fallback_severity: self.fallback_severity,
            emit_breach_symptoms: self.emit_breach_symptoms,
        }
    }
}
