pub mod dice;
pub mod expected;
pub mod export_csv;
pub mod sweep;

pub use dice::{
    effective_hit_threshold, p_threshold_success, p_unsaved, ward_factor, NATURAL_SIX_CHANCE,
};
pub use expected::{
    expected_damage_all, expected_damage_for_profile, expected_damage_for_unit, per_unit_damage,
    UnitDamage,
};
pub use export_csv::{sweep_to_csv, write_sweep_csv, ExportError};
pub use sweep::{save_label, sweep_table, SweepRow, SweepTable, SWEPT_SAVES};
