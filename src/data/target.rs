//! Defender-side configuration shared by every unit in one calculation.

use serde::{Deserialize, Serialize};

/// Largest to-hit penalty the app exposes.
pub const MAX_HIT_DEBUFF: i32 = 3;

/// Ward save and hit debuff applied against the whole roster.
/// `ward_needed` of 0 (or anything outside 2..6) means no ward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub ward_needed: i32,
    #[serde(default)]
    pub debuff_hit_enabled: bool,
    #[serde(default)]
    pub debuff_hit_value: i32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            ward_needed: 0,
            debuff_hit_enabled: false,
            debuff_hit_value: 0,
        }
    }
}

impl TargetConfig {
    /// Effective to-hit penalty: zero unless enabled, clamped to the app's
    /// 0..=3 range.
    pub fn hit_debuff(&self) -> i32 {
        if self.debuff_hit_enabled {
            self.debuff_hit_value.clamp(0, MAX_HIT_DEBUFF)
        } else {
            0
        }
    }
}
