//! Expected damage across the whole range of defensive saves — the table the
//! app shows after every edit.

use serde::Serialize;

use crate::data::{TargetConfig, UnitEntry};
use crate::engine::expected::expected_damage_for_unit;

/// Save thresholds the table sweeps, best to worst. A final row with no save
/// is appended after these.
pub const SWEPT_SAVES: [i32; 5] = [2, 3, 4, 5, 6];

/// One row of the sweep: a hypothetical save and every unit's expected
/// damage at it. `save: None` is the unarmoured row.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub save: Option<i32>,
    pub per_unit: Vec<f64>,
    pub total: f64,
}

/// Column-stable table: `per_unit[i]` in every row corresponds to
/// `unit_names[i]`. Inactive units keep their column and read 0.0 so the
/// display layout does not shift when a unit is toggled.
#[derive(Debug, Clone, Serialize)]
pub struct SweepTable {
    pub unit_names: Vec<String>,
    pub rows: Vec<SweepRow>,
}

pub fn sweep_table(units: &[UnitEntry], target: &TargetConfig) -> SweepTable {
    let unit_names = units.iter().map(|unit| unit.name.clone()).collect();
    let saves = SWEPT_SAVES.iter().map(|&save| Some(save)).chain([None]);
    let rows = saves
        .map(|save| {
            let per_unit: Vec<f64> = units
                .iter()
                .map(|unit| expected_damage_for_unit(unit, target, save))
                .collect();
            let total = per_unit.iter().sum();
            SweepRow {
                save,
                per_unit,
                total,
            }
        })
        .collect();
    SweepTable { unit_names, rows }
}

/// Display label for a swept save: "4+" or "-" for the no-save row.
pub fn save_label(save: Option<i32>) -> String {
    match save {
        Some(needed) => format!("{needed}+"),
        None => "-".to_string(),
    }
}
