//! Validate a persisted state document and report issues as strings.
//! This is a reporting layer for the CLI and pre-flight checks; the engine
//! itself clamps out-of-domain values and never needs the document to be
//! clean.

use std::collections::HashSet;
use std::fs;

use crate::data::store::AppState;
use crate::data::target::MAX_HIT_DEBUFF;
use crate::data::unit::{AttackProfile, UnitEntry};

fn threshold_in_domain(value: i32) -> bool {
    (2..=6).contains(&value)
}

fn check_profile(unit: &UnitEntry, profile: &AttackProfile, issues: &mut Vec<String>) {
    let context = format!("unit '{}' profile '{}'", unit.name, profile.name);
    if profile.id.trim().is_empty() {
        issues.push(format!("{context}: empty id"));
    }
    if profile.name.trim().is_empty() {
        issues.push(format!("{context}: empty name"));
    }
    if !threshold_in_domain(profile.to_hit) {
        issues.push(format!("{context}: to_hit {} outside 2..6", profile.to_hit));
    }
    if !threshold_in_domain(profile.to_wound) {
        issues.push(format!(
            "{context}: to_wound {} outside 2..6",
            profile.to_wound
        ));
    }
    if profile.models < 0 {
        issues.push(format!("{context}: negative models {}", profile.models));
    }
    if profile.attacks < 0 {
        issues.push(format!("{context}: negative attacks {}", profile.attacks));
    }
    if profile.rend < 0 {
        issues.push(format!("{context}: negative rend {}", profile.rend));
    }
    if profile.damage < 0 {
        issues.push(format!("{context}: negative damage {}", profile.damage));
    }
}

/// Collect every issue in an in-memory state. Empty list means clean.
pub fn validate_state(state: &AppState) -> Vec<String> {
    let mut issues = Vec::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for unit in &state.units {
        if unit.id.trim().is_empty() {
            issues.push(format!("unit '{}': empty id", unit.name));
        } else if !seen_ids.insert(unit.id.as_str()) {
            issues.push(format!("unit '{}': duplicate id '{}'", unit.name, unit.id));
        }
        if unit.name.trim().is_empty() {
            issues.push(format!("unit '{}': empty name", unit.id));
        }
        let mut seen_profile_ids: HashSet<&str> = HashSet::new();
        for profile in &unit.profiles {
            if !profile.id.trim().is_empty() && !seen_profile_ids.insert(profile.id.as_str()) {
                issues.push(format!(
                    "unit '{}': duplicate profile id '{}'",
                    unit.name, profile.id
                ));
            }
            check_profile(unit, profile, &mut issues);
        }
    }

    let ward = state.target.ward_needed;
    if ward != 0 && !threshold_in_domain(ward) {
        issues.push(format!("target: ward_needed {ward} is neither 0 nor in 2..6"));
    }
    let debuff = state.target.debuff_hit_value;
    if !(0..=MAX_HIT_DEBUFF).contains(&debuff) {
        issues.push(format!(
            "target: debuff_hit_value {debuff} outside 0..{MAX_HIT_DEBUFF}"
        ));
    }

    issues
}

/// Validate the document at `path`. Unlike [crate::data::store::load_state],
/// this does not paper over a broken file — parse failures are issues.
pub fn validate_state_file(path: &str) -> Result<(), Vec<String>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => return Err(vec![format!("{path}: {e}")]),
    };
    let state: AppState = match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => return Err(vec![format!("{path}: invalid document: {e}")]),
    };
    let issues = validate_state(&state);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
