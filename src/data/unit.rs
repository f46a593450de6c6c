//! Attacking-side value records: units and their weapon profiles.
//! These are the plain records the engine consumes; editing and display live
//! entirely in the app UI, persistence in [crate::data::store].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for units and profiles, generated once at creation and
/// kept across edits.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_active() -> bool {
    true
}

/// Melee or shooting profile. Has no effect on the damage formula; the app
/// uses it for grouping and icons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    #[default]
    Melee,
    Shoot,
}

/// One weapon/attack configuration on a unit.
///
/// Thresholds are meaningful in 2..6; anything outside is normalized by the
/// engine (<= 1 always succeeds, >= 7 never does), and negative counts are
/// treated as zero. The engine never rejects a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackProfile {
    #[serde(default = "new_record_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: AttackKind,
    pub models: i32,
    pub attacks: i32,
    pub to_hit: i32,
    pub to_wound: i32,
    #[serde(default)]
    pub rend: i32,
    pub damage: i32,
    #[serde(default = "default_active")]
    pub active: bool,
    /// A natural 6 scores two hits instead of one.
    #[serde(default)]
    pub two_hits: bool,
    /// A natural 6 wounds automatically, skipping the wound roll.
    #[serde(default)]
    pub auto_wound: bool,
    /// A natural 6 deals mortal damage, skipping wound and save rolls.
    #[serde(default)]
    pub mortal: bool,
    /// All-out attack: the needed hit roll improves by one, floor 2.
    #[serde(default)]
    pub all_out_attack: bool,
}

impl AttackProfile {
    /// Fresh profile with the app's default statline.
    pub fn new(name: &str) -> Self {
        Self {
            id: new_record_id(),
            name: name.to_string(),
            kind: AttackKind::Melee,
            models: 1,
            attacks: 1,
            to_hit: 4,
            to_wound: 4,
            rend: 0,
            damage: 1,
            active: true,
            two_hits: false,
            auto_wound: false,
            mortal: false,
            all_out_attack: false,
        }
    }
}

/// A named collection of attack profiles. Inactive units contribute zero
/// damage; an empty profile list is valid and also contributes zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitEntry {
    #[serde(default = "new_record_id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub profiles: Vec<AttackProfile>,
}

impl UnitEntry {
    /// Fresh unit seeded with one default profile, as the edit form creates it.
    pub fn new(name: &str) -> Self {
        Self {
            id: new_record_id(),
            name: name.to_string(),
            active: true,
            profiles: vec![AttackProfile::new(name)],
        }
    }
}
