pub mod store;
pub mod target;
pub mod unit;
pub mod validate;

pub use store::{
    load_state, save_state, state_path, AppState, DEFAULT_STATE_PATH, SCHEMA_VERSION,
};
pub use target::{TargetConfig, MAX_HIT_DEBUFF};
pub use unit::{new_record_id, AttackKind, AttackProfile, UnitEntry};
pub use validate::{validate_state, validate_state_file};
