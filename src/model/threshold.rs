//! Warn/alarm bound definitions scoped to a metric

use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Bounds for one metric, optionally scoped to an equipment type or a single unit.
///
/// A threshold with neither scope set is global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub metric: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_equipment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_equipment_type: Option<String>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub warn_low: Option<f64>,
    #[serde(default)]
    pub warn_high: Option<f64>,
    #[serde(default)]
    pub alarm_low: Option<f64>,
    #[serde(default)]
    pub alarm_high: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Threshold {
    /// Global, active threshold with no bounds set
    pub fn new(metric: impl Into<String>, unit: impl Into<String>) -> Self {
        Threshold {
            metric: metric.into(),
            scope_equipment_id: None,
            scope_equipment_type: None,
            unit: unit.into(),
            warn_low: None,
            warn_high: None,
            alarm_low: None,
            alarm_high: None,
            active: true,
        }
    }

    pub fn for_equipment(mut self, equipment_id: impl Into<String>) -> Self {
        self.scope_equipment_id = Some(equipment_id.into());
        self
    }

    pub fn for_type(mut self, equipment_type: impl Into<String>) -> Self {
        self.scope_equipment_type = Some(equipment_type.into());
        self
    }

    pub fn upper(mut self, warn_high: f64, alarm_high: f64) -> Self {
        self.warn_high = Some(warn_high);
        self.alarm_high = Some(alarm_high);
        self
    }

    pub fn lower(mut self, warn_low: f64, alarm_low: f64) -> Self {
        self.warn_low = Some(warn_low);
        self.alarm_low = Some(alarm_low);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn is_global(&self) -> bool {
        self.scope_equipment_id.is_none() && self.scope_equipment_type.is_none()
    }
}

/// Fleet defaults for the frac-spread equipment families
pub fn standard_thresholds() -> Vec<Threshold> {
    vec![
        // Engine
        Threshold::new("engine_oil_temp_c", "°C").for_type("engine").upper(110.0, 120.0),
        Threshold::new("engine_water_temp_c", "°C").for_type("engine").upper(95.0, 105.0),
        Threshold::new("engine_oil_pressure_psi", "psi")
            .for_type("engine")
            .lower(30.0, 25.0)
            .upper(90.0, 100.0),
        Threshold::new("engine_load_pct", "%").for_type("engine").upper(90.0, 100.0),
        // Transmission
        Threshold::new("trans_oil_temp_c", "°C").for_type("transmission").upper(110.0, 120.0),
        Threshold::new("trans_oil_pressure_psi", "psi")
            .for_type("transmission")
            .lower(80.0, 60.0)
            .upper(250.0, 300.0),
        // Power end
        Threshold::new("power_end_oil_temp_c", "°C").for_type("power_end").upper(110.0, 120.0),
        Threshold::new("power_end_oil_pressure_psi", "psi")
            .for_type("power_end")
            .lower(30.0, 25.0)
            .upper(90.0, 100.0),
        // Fluid end
        Threshold::new("fluid_end_vibration_mms", "mm/s").for_type("fluid_end").upper(5.0, 7.5),
    ]
}
