//! Value records consumed by the engine: facts, thresholds, equipment and severities

pub mod equipment;
pub mod fact;
pub mod severity;
pub mod threshold;

pub use equipment::{infer_equipment_type, Equipment};
pub use fact::{predicates, Fact, EXCEEDED_LIMITS};
pub use severity::{severity_label, ParseSeverityError, Severity, SeverityWeights};
pub use threshold::{standard_thresholds, Threshold};
