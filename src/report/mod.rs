//! Risk report assembly
//!
//! The report is the engine's only output: ranked risky nodes, ranked
//! similar pairs, and elevated facts grouped per location.

pub mod ranker;

pub use ranker::rank_top_risk;

use crate::embed::SimilarPair;
use crate::model::{Fact, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A node selected for the top-risk list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskNode {
    pub node_id: String,
    pub entity_type: String,
    pub label: String,
    /// `None` renders as NORMAL
    pub severity: Option<Severity>,
    pub degree: f64,
    pub betweenness: f64,
    pub closeness: f64,
    pub pagerank: f64,
}

/// An elevated fact as shown under its location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRiskFact {
    pub subject_id: String,
    pub object_id: String,
    pub predicate: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub top_risk_nodes: Vec<RiskNode>,
    pub top_similar_pairs: Vec<SimilarPair>,
    pub location_risk_groups: BTreeMap<String, Vec<LocationRiskFact>>,
}

/// Section sizes of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub risk_nodes: usize,
    pub similar_pairs: usize,
    pub locations: usize,
    pub grouped_facts: usize,
}

impl RiskReport {
    pub fn is_empty(&self) -> bool {
        self.top_risk_nodes.is_empty() && self.top_similar_pairs.is_empty() && self.location_risk_groups.is_empty()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            risk_nodes: self.top_risk_nodes.len(),
            similar_pairs: self.top_similar_pairs.len(),
            locations: self.location_risk_groups.len(),
            grouped_facts: self.location_risk_groups.values().map(Vec::len).sum(),
        }
    }
}

/// Merge the ranked sections with the per-location grouping of MED/HIGH facts.
///
/// Facts keep their input order inside a group; facts without a location are
/// not grouped.
pub fn aggregate(facts: &[Fact], top_risk_nodes: Vec<RiskNode>, top_similar_pairs: Vec<SimilarPair>) -> RiskReport {
    let mut location_risk_groups: BTreeMap<String, Vec<LocationRiskFact>> = BTreeMap::new();

    for fact in facts {
        let (Some(severity), Some(location)) = (fact.severity, fact.location_id.as_ref()) else {
            continue;
        };
        if !severity.is_elevated() {
            continue;
        }
        location_risk_groups
            .entry(location.clone())
            .or_default()
            .push(LocationRiskFact {
                subject_id: fact.subject_id.clone(),
                object_id: fact.object_id.clone(),
                predicate: fact.predicate.clone(),
                severity,
                metric: fact.metric.clone(),
                value: fact.value,
            });
    }

    let report = RiskReport {
        top_risk_nodes,
        top_similar_pairs,
        location_risk_groups,
    };
    debug!(summary = ?report.summary(), "Aggregated risk report");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::predicates;

    fn reading(equipment: &str, metric: &str, value: f64, severity: Severity, pad: Option<&str>) -> Fact {
        let mut fact = Fact::metric_reading(equipment, metric, value, "unit").with_severity(severity);
        fact.location_id = pad.map(str::to_string);
        fact
    }

    #[test]
    fn test_groups_only_elevated_located_facts() {
        let facts = vec![
            reading("ENG-27", "engine_oil_temp_c", 112.0, Severity::High, Some("PAD-B")),
            reading("ENG-34", "engine_oil_pressure_psi", 71.0, Severity::Med, Some("PAD-C")),
            reading("ENG-34", "engine_oil_pressure_psi", 20.0, Severity::Low, Some("PAD-C")),
            reading("TRANS-12", "trans_oil_temp_c", 130.0, Severity::High, None),
            Fact::new("ENG-27", "component", predicates::LOCATED_AT, "PAD-B", "pad").with_location("PAD-B"),
            reading("ENG-28", "engine_oil_temp_c", 125.0, Severity::High, Some("PAD-B")),
        ];
        let report = aggregate(&facts, Vec::new(), Vec::new());

        let keys: Vec<_> = report.location_risk_groups.keys().cloned().collect();
        assert_eq!(keys, vec!["PAD-B", "PAD-C"]);
        let pad_b = &report.location_risk_groups["PAD-B"];
        assert_eq!(pad_b.len(), 2);
        assert_eq!(pad_b[0].subject_id, "ENG-27");
        assert_eq!(pad_b[1].subject_id, "ENG-28");
        assert_eq!(pad_b[0].value, Some(112.0));
        assert_eq!(report.location_risk_groups["PAD-C"][0].severity, Severity::Med);

        let summary = report.summary();
        assert_eq!(summary.locations, 2);
        assert_eq!(summary.grouped_facts, 3);
    }

    #[test]
    fn test_empty_facts_give_empty_report() {
        let report = aggregate(&[], Vec::new(), Vec::new());
        assert!(report.is_empty());
        assert_eq!(report, RiskReport::default());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let facts = vec![reading("ENG-27", "engine_oil_temp_c", 112.0, Severity::High, Some("PAD-B"))];
        let report = aggregate(&facts, Vec::new(), Vec::new());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["location_risk_groups"]["PAD-B"][0]["severity"], "HIGH");
        let back: RiskReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}
