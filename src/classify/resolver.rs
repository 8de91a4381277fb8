//! Selects the most specific threshold for a (metric, equipment) pair

use crate::model::Threshold;

/// Specificity of a threshold for the given equipment; zero means not applicable.
///
/// A threshold carrying both scopes matches its unit at 3 and any other unit
/// of its type at 2.
fn specificity(threshold: &Threshold, equipment_type: Option<&str>, equipment_id: Option<&str>) -> u8 {
    let scope_id = threshold.scope_equipment_id.as_deref();
    let scope_type = threshold.scope_equipment_type.as_deref();
    if scope_id.is_some() && scope_id == equipment_id {
        3
    } else if scope_type.is_some() && scope_type == equipment_type {
        2
    } else if scope_id.is_none() && scope_type.is_none() {
        1
    } else {
        0
    }
}

/// Pick the active threshold for `metric` that best matches the equipment.
///
/// Unit scope beats type scope beats global. Ties keep the first candidate in
/// declaration order. Returns `None` when nothing applies.
pub fn resolve<'a>(
    thresholds: &'a [Threshold],
    metric: &str,
    equipment_type: Option<&str>,
    equipment_id: Option<&str>,
) -> Option<&'a Threshold> {
    let mut best: Option<(&Threshold, u8)> = None;
    for threshold in thresholds.iter().filter(|t| t.active && t.metric == metric) {
        let score = specificity(threshold, equipment_type, equipment_id);
        if score == 0 {
            continue;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((threshold, score));
        }
    }
    best.map(|(threshold, _)| threshold)
}
