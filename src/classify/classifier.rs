//! Directional severity classification of a reading against a threshold
//!
//! Lower-bound breaches are `Low`, upper-bound breaches are `High`, and an
//! in-band reading is `Med` (nominal). Rules are checked in the order
//! alarm_low, warn_low, alarm_high, warn_high.

use super::{ClassifyError, ClassifyResult};
use crate::model::{Severity, Threshold};

/// The bound a reading crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    AlarmLow,
    WarnLow,
    AlarmHigh,
    WarnHigh,
}

/// Outcome of classifying one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    /// `None` when the reading is within every bound
    pub crossed: Option<Bound>,
}

impl Classification {
    pub fn is_breach(&self) -> bool {
        self.crossed.is_some()
    }
}

/// Classify `value` and report which bound, if any, it crossed
pub fn classify_reading(threshold: &Threshold, value: f64) -> ClassifyResult<Classification> {
    if !value.is_finite() {
        return Err(ClassifyError::InvalidMetricValue {
            metric: threshold.metric.clone(),
            value,
        });
    }

    let crossed = if threshold.alarm_low.is_some_and(|b| value <= b) {
        Some(Bound::AlarmLow)
    } else if threshold.warn_low.is_some_and(|b| value <= b) {
        Some(Bound::WarnLow)
    } else if threshold.alarm_high.is_some_and(|b| value >= b) {
        Some(Bound::AlarmHigh)
    } else if threshold.warn_high.is_some_and(|b| value >= b) {
        Some(Bound::WarnHigh)
    } else {
        None
    };

    let severity = match crossed {
        Some(Bound::AlarmLow | Bound::WarnLow) => Severity::Low,
        Some(Bound::AlarmHigh | Bound::WarnHigh) => Severity::High,
        None => Severity::Med,
    };

    Ok(Classification { severity, crossed })
}

/// Map a reading to a severity
pub fn classify(threshold: &Threshold, value: f64) -> ClassifyResult<Severity> {
    classify_reading(threshold, value).map(|c| c.severity)
}
