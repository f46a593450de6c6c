use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::store::{load_state, save_state, AppState};
use crate::data::unit::{new_record_id, UnitEntry};
use crate::data::TargetConfig;
use crate::engine::expected::{expected_damage_all, per_unit_damage, UnitDamage};
use crate::engine::sweep::sweep_table;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<ValidationIssue>,
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "mathhammer-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Calculation request: the app posts its current records; nothing is read
/// from disk. `save` absent or null means the defender has no save.
#[derive(Debug, Clone, Deserialize)]
pub struct CalcRequest {
    #[serde(default)]
    pub units: Vec<UnitEntry>,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub save: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalcResponse {
    pub status: &'static str,
    pub save: Option<i32>,
    pub total: f64,
    pub per_unit: Vec<UnitDamage>,
}

#[derive(Debug)]
pub enum CalcPayloadError {
    Parse(serde_json::Error),
    Validation(ValidationErrorResponse),
}

impl fmt::Display for CalcPayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(_) => write!(f, "invalid calc request"),
        }
    }
}

impl std::error::Error for CalcPayloadError {}

fn validate_save(save: Option<i32>) -> Result<(), CalcPayloadError> {
    let Some(save) = save else { return Ok(()) };
    if (2..=6).contains(&save) {
        return Ok(());
    }
    Err(CalcPayloadError::Validation(ValidationErrorResponse {
        status: "error",
        message: "Validation failed",
        errors: vec![ValidationIssue {
            field: "save",
            messages: vec!["must be absent or between 2 and 6".to_string()],
        }],
    }))
}

pub fn calc_payload(body: &str) -> Result<String, CalcPayloadError> {
    let request: CalcRequest = serde_json::from_str(body).map_err(CalcPayloadError::Parse)?;
    validate_save(request.save)?;

    let response = CalcResponse {
        status: "ok",
        save: request.save,
        total: expected_damage_all(&request.units, &request.target, request.save),
        per_unit: per_unit_damage(&request.units, &request.target, request.save),
    };
    serde_json::to_string_pretty(&response).map_err(CalcPayloadError::Parse)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SweepRequest {
    #[serde(default)]
    pub units: Vec<UnitEntry>,
    #[serde(default)]
    pub target: TargetConfig,
}

/// Sweep over records supplied in the request body.
pub fn sweep_post_payload(body: &str) -> Result<String, CalcPayloadError> {
    let request: SweepRequest = serde_json::from_str(body).map_err(CalcPayloadError::Parse)?;
    let table = sweep_table(&request.units, &request.target);
    serde_json::to_string_pretty(&serde_json::json!({ "status": "ok", "table": table }))
        .map_err(CalcPayloadError::Parse)
}

/// Sweep over the persisted state.
pub fn sweep_get_payload(state_path: &str) -> Result<String, serde_json::Error> {
    let state = load_state(state_path);
    let table = sweep_table(&state.units, &state.target);
    serde_json::to_string_pretty(&serde_json::json!({ "status": "ok", "table": table }))
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitListItem {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub profile_count: usize,
}

pub fn units_payload(state_path: &str) -> Result<String, serde_json::Error> {
    let state = load_state(state_path);
    let list: Vec<UnitListItem> = state
        .units
        .iter()
        .map(|unit| UnitListItem {
            id: unit.id.clone(),
            name: unit.name.clone(),
            active: unit.active,
            profile_count: unit.profiles.len(),
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "units": list }))
}

#[derive(Debug)]
pub enum UnitPayloadError {
    Parse(serde_json::Error),
    Validation(ValidationErrorResponse),
    NotFound,
    Io(std::io::Error),
}

impl fmt::Display for UnitPayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Validation(_) => write!(f, "invalid unit payload"),
            Self::NotFound => write!(f, "Unit not found"),
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for UnitPayloadError {}

fn validate_unit(unit: &UnitEntry) -> Result<(), UnitPayloadError> {
    if !unit.name.trim().is_empty() {
        return Ok(());
    }
    Err(UnitPayloadError::Validation(ValidationErrorResponse {
        status: "error",
        message: "Validation failed",
        errors: vec![ValidationIssue {
            field: "name",
            messages: vec!["must not be empty".to_string()],
        }],
    }))
}

/// Fill in generated ids wherever the incoming document has none.
fn ensure_unit_ids(unit: &mut UnitEntry) {
    if unit.id.trim().is_empty() {
        unit.id = new_record_id();
    }
    for profile in &mut unit.profiles {
        if profile.id.trim().is_empty() {
            profile.id = new_record_id();
        }
    }
}

pub fn unit_get_payload(state_path: &str, id: &str) -> Result<String, UnitPayloadError> {
    let state = load_state(state_path);
    let unit = state.find_unit(id).ok_or(UnitPayloadError::NotFound)?;
    serde_json::to_string_pretty(unit).map_err(UnitPayloadError::Parse)
}

pub fn unit_post_payload(state_path: &str, body: &str) -> Result<String, UnitPayloadError> {
    let mut unit: UnitEntry = serde_json::from_str(body).map_err(UnitPayloadError::Parse)?;
    validate_unit(&unit)?;
    ensure_unit_ids(&mut unit);

    let mut state = load_state(state_path);
    state.upsert_unit(unit.clone());
    save_state(state_path, &state).map_err(UnitPayloadError::Io)?;
    serde_json::to_string_pretty(&unit).map_err(UnitPayloadError::Parse)
}

/// Whole-document replacement of one unit; the path id wins over any id in
/// the body.
pub fn unit_put_payload(state_path: &str, id: &str, body: &str) -> Result<String, UnitPayloadError> {
    let mut unit: UnitEntry = serde_json::from_str(body).map_err(UnitPayloadError::Parse)?;
    validate_unit(&unit)?;
    unit.id = id.to_string();
    ensure_unit_ids(&mut unit);

    let mut state = load_state(state_path);
    if state.find_unit(id).is_none() {
        return Err(UnitPayloadError::NotFound);
    }
    state.upsert_unit(unit.clone());
    save_state(state_path, &state).map_err(UnitPayloadError::Io)?;
    serde_json::to_string_pretty(&unit).map_err(UnitPayloadError::Parse)
}

pub fn unit_delete_payload(state_path: &str, id: &str) -> Result<String, UnitPayloadError> {
    let mut state = load_state(state_path);
    if !state.remove_unit(id) {
        return Err(UnitPayloadError::NotFound);
    }
    save_state(state_path, &state).map_err(UnitPayloadError::Io)?;
    serde_json::to_string_pretty(&serde_json::json!({ "status": "ok" }))
        .map_err(UnitPayloadError::Parse)
}

pub fn target_get_payload(state_path: &str) -> Result<String, serde_json::Error> {
    let state = load_state(state_path);
    serde_json::to_string_pretty(&state.target)
}

pub fn target_put_payload(state_path: &str, body: &str) -> Result<String, UnitPayloadError> {
    let target: TargetConfig = serde_json::from_str(body).map_err(UnitPayloadError::Parse)?;
    let mut state = load_state(state_path);
    state.target = target.clone();
    save_state(state_path, &state).map_err(UnitPayloadError::Io)?;
    serde_json::to_string_pretty(&target).map_err(UnitPayloadError::Parse)
}

#[derive(Debug, Clone, Serialize)]
pub struct StateVersionResponse {
    pub schema_version: u32,
    pub unit_count: usize,
    pub updated_at: Option<String>,
}

pub fn state_version_payload(state_path: &str) -> Result<String, serde_json::Error> {
    let state: AppState = load_state(state_path);
    let response = StateVersionResponse {
        schema_version: state.schema_version,
        unit_count: state.units.len(),
        updated_at: state.updated_at,
    };
    serde_json::to_string_pretty(&response)
}
