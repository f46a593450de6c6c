//! Closed-form expected damage for one attack pipeline:
//! hit roll, wound roll, armour save, ward. No simulation and no randomness;
//! every step is analytic probability arithmetic over immutable records.

use serde::Serialize;

use crate::data::{AttackProfile, TargetConfig, UnitEntry};
use crate::engine::dice::{
    effective_hit_threshold, p_threshold_success, p_unsaved, ward_factor, NATURAL_SIX_CHANCE,
};

/// Expected damage for a single attack profile against `target` at a
/// hypothetical armour save (`None` = no save).
///
/// Each attack die is split into two disjoint buckets: rolls in
/// [effective threshold, 5] follow the plain hit/wound/save pipeline, while a
/// natural 6 is an unconditional hit that may carry critical effects
/// (`two_hits`, `auto_wound`, `mortal`). The ward is applied last, after all
/// other mitigation. Malformed inputs are clamped, never rejected.
pub fn expected_damage_for_profile(
    profile: &AttackProfile,
    target: &TargetConfig,
    base_save: Option<i32>,
) -> f64 {
    if !profile.active {
        return 0.0;
    }
    let total_attacks = f64::from(profile.models.max(0)) * f64::from(profile.attacks.max(0));
    if total_attacks <= 0.0 {
        return 0.0;
    }

    let eff_hit = effective_hit_threshold(profile.to_hit, target.hit_debuff(), profile.all_out_attack);
    let p_wound = p_threshold_success(profile.to_wound);
    let p_through_save = p_unsaved(base_save, profile.rend);
    let damage = f64::from(profile.damage.max(0));

    // Successes below a natural 6: never trigger critical effects.
    let plain_mass = f64::from((6 - eff_hit).max(0)) / 6.0;
    let plain = plain_mass * p_wound * p_through_save * damage;

    // A natural 6 always hits, even when the computed threshold is out of reach.
    let crit_hits = if profile.two_hits { 2.0 } else { 1.0 };
    let crit_wound = if profile.mortal || profile.auto_wound {
        1.0
    } else {
        p_wound
    };
    let crit_through_save = if profile.mortal { 1.0 } else { p_through_save };
    let crit = NATURAL_SIX_CHANCE * crit_hits * crit_wound * crit_through_save * damage;

    (plain + crit) * total_attacks * ward_factor(target.ward_needed)
}

/// Sum over a unit's profiles; an inactive unit contributes exactly zero.
pub fn expected_damage_for_unit(
    unit: &UnitEntry,
    target: &TargetConfig,
    base_save: Option<i32>,
) -> f64 {
    if !unit.active {
        return 0.0;
    }
    unit.profiles
        .iter()
        .map(|profile| expected_damage_for_profile(profile, target, base_save))
        .sum()
}

/// Sum over the whole roster, skipping inactive units.
pub fn expected_damage_all(
    units: &[UnitEntry],
    target: &TargetConfig,
    base_save: Option<i32>,
) -> f64 {
    units
        .iter()
        .map(|unit| expected_damage_for_unit(unit, target, base_save))
        .sum()
}

/// Per-unit result row used by the calc API and CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct UnitDamage {
    pub id: String,
    pub name: String,
    pub expected_damage: f64,
}

/// Evaluate every unit individually at one save threshold.
pub fn per_unit_damage(
    units: &[UnitEntry],
    target: &TargetConfig,
    base_save: Option<i32>,
) -> Vec<UnitDamage> {
    units
        .iter()
        .map(|unit| UnitDamage {
            id: unit.id.clone(),
            name: unit.name.clone(),
            expected_damage: expected_damage_for_unit(unit, target, base_save),
        })
        .collect()
}
