//! Threshold resolution, severity classification and fact annotation

pub mod classifier;
pub mod ingest;
pub mod resolver;

pub use classifier::{classify, classify_reading, Bound, Classification};
pub use ingest::{annotate, AnnotateOptions, AnnotatedFacts, AnnotationStats};
pub use resolver::resolve;

use thiserror::Error;

/// Classification errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// Reading is NaN or infinite
    #[error("Invalid value {value} for metric {metric}")]
    InvalidMetricValue { metric: String, value: f64 },
}

pub type ClassifyResult<T> = Result<T, ClassifyError>;
