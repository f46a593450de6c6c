//! Persisted app state: one JSON document holding the roster and target,
//! replaced whole on every write. Loading is total — a missing or unreadable
//! document yields the default state rather than an error.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::target::TargetConfig;
use crate::data::unit::{new_record_id, UnitEntry};

/// Current on-disk document version. Documents without the field are treated
/// as version 1.
pub const SCHEMA_VERSION: u32 = 2;

pub const DEFAULT_STATE_PATH: &str = "data/appstate.json";

/// Resolve the state path: `MATHHAMMER_STATE` override or the default.
pub fn state_path() -> String {
    std::env::var("MATHHAMMER_STATE").unwrap_or_else(|_| DEFAULT_STATE_PATH.to_string())
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub units: Vec<UnitEntry>,
    #[serde(default)]
    pub target: TargetConfig,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            updated_at: None,
            units: Vec::new(),
            target: TargetConfig::default(),
        }
    }
}

impl AppState {
    pub fn find_unit(&self, id: &str) -> Option<&UnitEntry> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Replace the unit with the same id, or append when new.
    pub fn upsert_unit(&mut self, unit: UnitEntry) {
        match self.units.iter_mut().find(|existing| existing.id == unit.id) {
            Some(existing) => *existing = unit,
            None => self.units.push(unit),
        }
    }

    /// Remove by id; returns whether anything was removed.
    pub fn remove_unit(&mut self, id: &str) -> bool {
        let before = self.units.len();
        self.units.retain(|unit| unit.id != id);
        self.units.len() != before
    }
}

/// Upgrade an older document in place. Version 1 stored the ward as a nested
/// `target.ward {enabled, needed}` block; version 2 flattens it to
/// `ward_needed` with 0 meaning disabled.
fn migrate_document(document: &mut Value) {
    let version = document
        .get("schema_version")
        .and_then(Value::as_u64)
        .unwrap_or(1) as u32;
    if version >= SCHEMA_VERSION {
        return;
    }

    if let Some(target) = document.get_mut("target").and_then(Value::as_object_mut) {
        if let Some(ward) = target.remove("ward") {
            let enabled = ward.get("enabled").and_then(Value::as_bool).unwrap_or(false);
            let needed = ward.get("needed").and_then(Value::as_i64).unwrap_or(0);
            let ward_needed = if enabled { needed } else { 0 };
            target.insert("ward_needed".to_string(), Value::from(ward_needed));
        }
    }

    if let Some(object) = document.as_object_mut() {
        object.insert("schema_version".to_string(), Value::from(SCHEMA_VERSION));
    }
}

/// Give every unit and profile a generated id when the document carries none.
fn backfill_ids(state: &mut AppState) {
    for unit in &mut state.units {
        if unit.id.trim().is_empty() {
            unit.id = new_record_id();
        }
        for profile in &mut unit.profiles {
            if profile.id.trim().is_empty() {
                profile.id = new_record_id();
            }
        }
    }
}

/// Load the app state from `path`. Missing file, unreadable file, or invalid
/// JSON all return the default state; older documents are migrated.
pub fn load_state(path: &str) -> AppState {
    let path = Path::new(path);
    if !path.exists() {
        return AppState::default();
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return AppState::default(),
    };
    let mut document: Value = match serde_json::from_str(&raw) {
        Ok(document) => document,
        Err(_) => return AppState::default(),
    };
    migrate_document(&mut document);
    let mut state: AppState = serde_json::from_value(document).unwrap_or_default();
    backfill_ids(&mut state);
    state
}

/// Write the whole document, restamping version and `updated_at`.
pub fn save_state(path: &str, state: &AppState) -> std::io::Result<()> {
    let mut stamped = state.clone();
    stamped.schema_version = SCHEMA_VERSION;
    stamped.updated_at = Some(Utc::now().to_rfc3339());

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let raw = serde_json::to_string_pretty(&stamped)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(path, raw)
}
