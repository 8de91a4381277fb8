//! Entity nodes of the knowledge graph

use crate::model::Severity;
use serde::{Deserialize, Serialize};

/// A graph entity: equipment, location, symptom or metric.
///
/// Identity is the entity id. `severity` only ever moves upward across the
/// facts that touch the node; `None` means no fact carried a severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub entity_type: String,
    pub label: String,
    pub severity: Option<Severity>,
}

impl Node {
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>) -> Self {
        let id = id.into();
        Node {
            label: id.clone(),
            id,
            entity_type: entity_type.into(),
            severity: None,
        }
    }

    /// Raise the severity to `observed` if it is higher
    pub fn upgrade_severity(&mut self, observed: Option<Severity>) {
        if observed > self.severity {
            self.severity = observed;
        }
    }
}
