//! Equipment registry records

use serde::{Deserialize, Serialize};

/// A unit of equipment and where it is installed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub equipment_id: String,
    pub equipment_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

impl Equipment {
    pub fn new(equipment_id: impl Into<String>, equipment_type: impl Into<String>) -> Self {
        Equipment {
            equipment_id: equipment_id.into(),
            equipment_type: equipment_type.into(),
            location_id: None,
        }
    }

    pub fn at(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }
}

/// Equipment type implied by an identity prefix such as `ENG-12` or `TRANS-3`
pub fn infer_equipment_type(equipment_id: &str) -> Option<&'static str> {
    let id = equipment_id.trim().to_ascii_uppercase();
    const PREFIXES: [(&str, &str); 5] = [
        ("ENG", "engine"),
        ("TRANS", "transmission"),
        ("LOCKUP", "lockup"),
        ("POWER_END", "power_end"),
        ("FLUID_END", "fluid_end"),
    ];
    PREFIXES
        .iter()
        .find(|(prefix, _)| id.starts_with(prefix))
        .map(|(_, kind)| *kind)
}
