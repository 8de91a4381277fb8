//! Annotates incoming facts with threshold-derived severities

use super::classifier::classify_reading;
use super::resolver::resolve;
use crate::model::{infer_equipment_type, predicates, Equipment, Fact, Severity, Threshold, EXCEEDED_LIMITS};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Caller policy for readings the thresholds cannot classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateOptions {
    /// Severity given to a reading with no applicable threshold.
    /// `None` leaves the fact's own severity untouched.
    pub fallback_severity: Option<Severity>,
    /// Emit `has_symptom exceeded_limits` for readings that cross a bound
    pub emit_breach_symptoms: bool,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            fallback_severity: None,
            emit_breach_symptoms: true,
        }
    }
}

/// Counters collected while annotating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationStats {
    pub classified: usize,
    pub unresolved: usize,
    pub invalid: usize,
    pub derived: usize,
}

#[derive(Debug, Clone)]
pub struct AnnotatedFacts {
    pub facts: Vec<Fact>,
    pub stats: AnnotationStats,
}

/// Classify every metric reading and fill in locations from the registry.
///
/// Facts are never dropped: a reading with an invalid value keeps its
/// structural role and only skips classification.
pub fn annotate(
    facts: Vec<Fact>,
    thresholds: &[Threshold],
    equipment: &[Equipment],
    options: &AnnotateOptions,
) -> AnnotatedFacts {
    let registry: FxHashMap<&str, &Equipment> = equipment
        .iter()
        .map(|e| (e.equipment_id.as_str(), e))
        .collect();

    let mut stats = AnnotationStats::default();
    let mut out = Vec::with_capacity(facts.len());

    for mut fact in facts {
        let entry = registry.get(fact.equipment()).copied();
        if fact.location_id.is_none() {
            fact.location_id = entry.and_then(|e| e.location_id.clone());
        }

        let Some((metric, value)) = fact.reading() else {
            out.push(fact);
            continue;
        };

        let equipment_id = fact.equipment();
        let equipment_type = entry
            .map(|e| e.equipment_type.as_str())
            .or_else(|| infer_equipment_type(equipment_id));

        let mut derived = None;
        match resolve(thresholds, metric, equipment_type, Some(equipment_id)) {
            Some(threshold) => match classify_reading(threshold, value) {
                Ok(classification) => {
                    stats.classified += 1;
                    if options.emit_breach_symptoms && classification.is_breach() {
                        derived = Some(breach_symptom(&fact, classification.severity));
                    }
                    fact.severity = Some(classification.severity);
                }
                Err(e) => {
                    stats.invalid += 1;
                    warn!(subject = %fact.subject_id, error = %e, "Skipping classification");
                }
            },
            None => {
                stats.unresolved += 1;
                debug!(subject = %fact.subject_id, metric, "No threshold applies");
                // No severity signal from thresholds; only the configured fallback applies.
                if let Some(fallback) = options.fallback_severity {
                    fact.severity = Some(fallback);
                }
            }
        }

        out.push(fact);
        if let Some(symptom) = derived {
            stats.derived += 1;
            out.push(symptom);
        }
    }

    info!(
        classified = stats.classified,
        unresolved = stats.unresolved,
        invalid = stats.invalid,
        derived = stats.derived,
        "Annotated facts"
    );

    AnnotatedFacts { facts: out, stats }
}

fn breach_symptom(reading: &Fact, severity: Severity) -> Fact {
    let mut symptom = Fact::new(
        reading.subject_id.clone(),
        reading.subject_type.clone(),
        predicates::HAS_SYMPTOM,
        EXCEEDED_LIMITS,
        "symptom",
    )
    .with_severity(severity)
    .with_equipment(reading.equipment())
    .at(reading.timestamp);
    symptom.location_id = reading.location_id.clone();
    symptom
}
