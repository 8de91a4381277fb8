//! Severity levels attached to metric readings and graph nodes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered risk level: `High > Med > Low`.
///
/// A node that never saw a severity carries `None`, rendered as `NORMAL`,
/// which orders below every variant (`Option` puts `None` first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Med,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Med => "MED",
            Severity::High => "HIGH",
        }
    }

    /// `true` for the severities grouped per location in the report
    pub fn is_elevated(&self) -> bool {
        matches!(self, Severity::Med | Severity::High)
    }
}

/// Display label for an optional severity
pub fn severity_label(severity: Option<Severity>) -> &'static str {
    severity.map(|s| s.as_str()).unwrap_or("NORMAL")
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown severity text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown severity: {0}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Severity::Low),
            "MED" | "MEDIUM" => Ok(Severity::Med),
            "HIGH" => Ok(Severity::High),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Ranking weights used to order risky nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    pub high: u32,
    pub med: u32,
    pub low: u32,
    pub normal: u32,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            high: 3,
            med: 2,
            low: 1,
            normal: 0,
        }
    }
}

impl SeverityWeights {
    pub fn rank(&self, severity: Option<Severity>) -> u32 {
        match severity {
            Some(Severity::High) => self.high,
            Some(Severity::Med) => self.med,
            Some(Severity::Low) => self.low,
            None => self.normal,
        }
    }
}
