//! Export the expected-damage sweep of a persisted state document as CSV.
//!
//! Usage: `export_damage_table [state-path] [output-path]`
//! Defaults: `data/appstate.json` and `data/damage_table.csv`.

use std::env;
use std::process;

use mathhammer::data::store::{load_state, DEFAULT_STATE_PATH};
use mathhammer::engine::export_csv::write_sweep_csv;
use mathhammer::engine::sweep::sweep_table;

fn main() {
    let args: Vec<String> = env::args().collect();
    let state_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or(DEFAULT_STATE_PATH);
    let output_path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or("data/damage_table.csv");

    let state = load_state(state_path);
    if state.units.is_empty() {
        eprintln!("warning: no units in '{state_path}', exporting an empty table");
    }

    let table = sweep_table(&state.units, &state.target);
    if let Err(err) = write_sweep_csv(output_path, &table) {
        eprintln!("export failed: {err}");
        process::exit(1);
    }
    println!(
        "export complete: units={}, rows={}, path='{}'",
        table.unit_names.len(),
        table.rows.len(),
        output_path
    );
}
