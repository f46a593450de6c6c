use std::env;

use crate::data::store::{load_state, state_path};
use crate::data::validate::validate_state_file;
use crate::engine::expected::{expected_damage_all, per_unit_damage};
use crate::engine::export_csv::write_sweep_csv;
use crate::engine::sweep::{save_label, sweep_table};
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Calc,
    Sweep,
    Export,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("calc") => Some(Command::Calc),
        Some("sweep") => Some(Command::Sweep),
        Some("export") => Some(Command::Export),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Calc) => handle_calc(args),
        Some(Command::Sweep) => handle_sweep(args),
        Some(Command::Export) => handle_export(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: mathhammer <serve|calc|sweep|export|validate>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("MATHHAMMER_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_calc(args: &[String]) -> i32 {
    let save = parse_save_arg(args.get(2));
    let as_table = args.iter().any(|arg| arg == "--table");

    let state = load_state(&state_path());
    let total = expected_damage_all(&state.units, &state.target, save);
    let per_unit = per_unit_damage(&state.units, &state.target, save);

    if as_table {
        println!("save\tunit\texpected_damage");
        for row in &per_unit {
            println!("{}\t{}\t{:.4}", save_label(save), row.name, row.expected_damage);
        }
        println!("{}\ttotal\t{:.4}", save_label(save), total);
        return 0;
    }

    let payload = serde_json::json!({
        "save": save,
        "total": total,
        "per_unit": per_unit,
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(rendered) => {
            println!("{rendered}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize calc result: {err}");
            1
        }
    }
}

fn handle_sweep(args: &[String]) -> i32 {
    let as_table = args.iter().any(|arg| arg == "--table");

    let state = load_state(&state_path());
    let table = sweep_table(&state.units, &state.target);

    if as_table {
        println!("save\t{}\ttotal", table.unit_names.join("\t"));
        for row in &table.rows {
            let cells: Vec<String> = row
                .per_unit
                .iter()
                .map(|value| format!("{value:.4}"))
                .collect();
            println!(
                "{}\t{}\t{:.4}",
                save_label(row.save),
                cells.join("\t"),
                row.total
            );
        }
        return 0;
    }

    match serde_json::to_string_pretty(&table) {
        Ok(rendered) => {
            println!("{rendered}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize sweep table: {err}");
            1
        }
    }
}

fn handle_export(args: &[String]) -> i32 {
    let output_path = args
        .get(2)
        .filter(|arg| !arg.starts_with("--"))
        .map(String::as_str)
        .unwrap_or("data/damage_table.csv");

    let state = load_state(&state_path());
    let table = sweep_table(&state.units, &state.target);
    match write_sweep_csv(output_path, &table) {
        Ok(()) => {
            println!(
                "export complete: rows={}, path='{}'",
                table.rows.len(),
                output_path
            );
            0
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let default_path = state_path();
    let path = args.get(2).map(String::as_str).unwrap_or(&default_path);

    match validate_state_file(path) {
        Ok(()) => {
            println!("validation passed: {path}");
            0
        }
        Err(issues) => {
            eprintln!("validation failed: {} issue(s)", issues.len());
            for issue in issues {
                eprintln!("- {issue}");
            }
            1
        }
    }
}

/// Optional save argument: omitted, `-`, or `none` mean no save; anything
/// unparsable or outside 2..6 warns and falls back to no save.
fn parse_save_arg(raw: Option<&String>) -> Option<i32> {
    let raw = raw?;
    if raw == "-" || raw.eq_ignore_ascii_case("none") || raw.starts_with("--") {
        return None;
    }
    match raw.parse::<i32>() {
        Ok(save) if (2..=6).contains(&save) => Some(save),
        _ => {
            eprintln!("invalid save '{raw}', defaulting to no save");
            None
        }
    }
}
