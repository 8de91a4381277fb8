//! Timestamped (subject, predicate, object) facts

use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Predicate names produced by the fact extraction stage
pub mod predicates {
    pub const HAS_METRIC: &str = "has_metric";
    pub const HAS_SYMPTOM: &str = "has_symptom";
    pub const HAS_STATUS: &str = "has_status";
    pub const LOCATED_AT: &str = "located_at";
}

/// Object id of the symptom derived from a threshold breach
pub const EXCEEDED_LIMITS: &str = "exceeded_limits";

/// An immutable triple with optional metric and provenance annotations.
///
/// A fact with `metric` set is a quantitative observation; a fact with
/// predicate `has_symptom` is a derived qualitative flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub subject_id: String,
    pub subject_type: String,
    pub predicate: String,
    pub object_id: String,
    pub object_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    /// Unparseable input is kept as NaN so classification reports it
    #[serde(default, deserialize_with = "lenient_value", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<String>,
    #[serde(default)]
    pub timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<RawValue>::deserialize(deserializer)?.map(|raw| match raw {
        RawValue::Number(value) => value,
        RawValue::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        RawValue::Other(_) => f64::NAN,
    }))
}

impl Fact {
    /// Create a bare triple stamped with the Unix epoch
    pub fn new(
        subject_id: impl Into<String>,
        subject_type: impl Into<String>,
        predicate: impl Into<String>,
        object_id: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        Fact {
            subject_id: subject_id.into(),
            subject_type: subject_type.into(),
            predicate: predicate.into(),
            object_id: object_id.into(),
            object_type: object_type.into(),
            metric: None,
            value: None,
            unit: None,
            severity: None,
            location_id: None,
            equipment_id: None,
            timestamp: DateTime::<Utc>::default(),
        }
    }

    /// `equipment has_metric metric` observation carrying a reading
    pub fn metric_reading(
        equipment_id: impl Into<String>,
        metric: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
    ) -> Self {
        let equipment_id = equipment_id.into();
        let metric = metric.into();
        let mut fact = Fact::new(
            equipment_id.clone(),
            "component",
            predicates::HAS_METRIC,
            metric.clone(),
            "metric",
        );
        fact.metric = Some(metric);
        fact.value = Some(value);
        fact.unit = Some(unit.into());
        fact.equipment_id = Some(equipment_id);
        fact
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_location(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    pub fn with_equipment(mut self, equipment_id: impl Into<String>) -> Self {
        self.equipment_id = Some(equipment_id.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Metric name and reading, if this fact is a quantitative observation
    pub fn reading(&self) -> Option<(&str, f64)> {
        Some((self.metric.as_deref()?, self.value?))
    }

    /// Equipment the fact is about: the explicit annotation, else the subject
    pub fn equipment(&self) -> &str {
        self.equipment_id.as_deref().unwrap_or(&self.subject_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_reading_shape() {
        let fact = Fact::metric_reading("ENG-27", "engine_oil_temp_c", 112.0, "°C").with_location("PAD-B");
        assert_eq!(fact.predicate, predicates::HAS_METRIC);
        assert_eq!(fact.object_id, "engine_oil_temp_c");
        assert_eq!(fact.reading(), Some(("engine_oil_temp_c", 112.0)));
        assert_eq!(fact.equipment(), "ENG-27");
        assert_eq!(fact.location_id.as_deref(), Some("PAD-B"));
    }

    #[test]
    fn test_plain_fact_has_no_reading() {
        let fact = Fact::new("ENG-12", "component", predicates::LOCATED_AT, "PAD-A", "pad");
        assert!(fact.reading().is_none());
        assert_eq!(fact.equipment(), "ENG-12");
    }

    #[test]
    fn test_json_optional_fields() {
        let json = r#"{
            "subject_id": "ENG-12", "subject_type": "component",
            "predicate": "has_symptom", "object_id": "Overheating", "object_type": "symptom",
            "severity": "HIGH", "location_id": "PAD-A",
            "timestamp": "2025-09-12T08:15:00Z"
        }"#;
        let fact: Fact = serde_json::from_str(json).unwrap();
        assert_eq!(fact.severity, Some(Severity::High));
        assert!(fact.metric.is_none());
        assert_eq!(fact.timestamp.to_rfc3339(), "2025-09-12T08:15:00+00:00");
    }

    #[test]
    fn test_json_value_parsed_leniently() {
        let parse = |value: &str| -> Option<f64> {
            let json = format!(
                r#"{{"subject_id": "ENG-12", "subject_type": "component", "predicate": "has_metric",
                    "object_id": "engine_load_pct", "object_type": "metric",
                    "metric": "engine_load_pct", "value": {value}}}"#
            );
            serde_json::from_str::<Fact>(&json).unwrap().value
        };
        assert_eq!(parse("87"), Some(87.0));
        assert_eq!(parse("\"92.5\""), Some(92.5));
        assert_eq!(parse("null"), None);
        assert!(parse("\"n/a\"").is_some_and(f64::is_nan));
        assert!(parse("[1, 2]").is_some_and(f64::is_nan));
    }
}
