//! Directed, predicate-labelled edges

use serde::{Deserialize, Serialize};

/// A directed edge between two node indices.
///
/// Facts between the same ordered pair share one edge; each distinct
/// predicate is kept once, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node index (the fact subject)
    pub source: usize,
    /// Target node index (the fact object)
    pub target: usize,
    pub predicates: Vec<String>,
}

impl Edge {
    pub fn new(source: usize, target: usize, predicate: impl Into<String>) -> Self {
        Edge {
            source,
            target,
            predicates: vec![predicate.into()],
        }
    }

    /// Record another predicate; returns `false` if it was already present
    pub fn add_predicate(&mut self, predicate: &str) -> bool {
        if self.has_predicate(predicate) {
            return false;
        }
        self.predicates.push(predicate.to_string());
        true
    }

    pub fn has_predicate(&self, predicate: &str) -> bool {
        self.predicates.iter().any(|p| p == predicate)
    }
}
