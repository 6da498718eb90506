//! # Clarify CLI Application
//!
//! Terminal interface for sedimentation tank design. Prompts for the design
//! inputs, sizes the tank, and persists the session to a `.cfy` file that the
//! other shells (and later runs of this one) can pick up.
//!
//! ## Modes
//!
//! - `design [FILE]` - prompt for inputs, compute, save
//! - `show [FILE]` - re-render the stored design without recomputing
//! - `report [FILE] [OUT.pdf]` - render the session report to PDF

use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tank_core::design::{DesignResult, TankGeometry, TankType};
use tank_core::errors::{CalcError, CalcResult};
use tank_core::report::render_session_pdf;
use tank_core::schematic::{plan_view, PlanOutline, Viewport};
use tank_core::session::{DesignRecord, Session};
use tank_core::store::{load_session, load_session_with_lock_check, save_session, FileLock};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).map(String::as_str).unwrap_or("design");

    if mode == "--help" || mode == "-h" || mode == "help" {
        print_usage();
        return;
    }

    let outcome = match mode {
        "design" => run_design(&session_path(&args, 2)),
        "show" => run_show(&session_path(&args, 2)),
        "report" => run_report(&session_path(&args, 2), args.get(3).map(PathBuf::from)),
        other => {
            eprintln!("Unknown mode: {}", other);
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Clarify - Sedimentation Tank Design Calculator");
    println!();
    println!("USAGE:");
    println!("    tank_cli [MODE] [FILE]");
    println!();
    println!("MODES:");
    println!("    design [FILE]            Prompt for inputs, size the tank, save the session");
    println!("    show [FILE]              Print the stored design without recomputing");
    println!("    report [FILE] [OUT.pdf]  Render the session report to PDF");
    println!();
    println!("FILE defaults to tank_design.cfy in the current directory.");
}

/// Session file argument with its documented default
fn session_path(args: &[String], idx: usize) -> PathBuf {
    args.get(idx)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tank_design.cfy"))
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_string(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn prompt_tank_type(default: TankType) -> TankType {
    print!("Tank type (H=horizontal, C=circular) [{}]: ", default.code());
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    match input.trim().to_ascii_lowercase().as_str() {
        "h" | "horizontal" => TankType::Horizontal,
        "c" | "circular" => TankType::Circular,
        _ => default,
    }
}

fn run_design(path: &Path) -> CalcResult<()> {
    println!("Clarify CLI - Sedimentation Tank Designer");
    println!("=========================================");
    println!();

    let mut session = if path.exists() {
        let session = load_session(path)?;
        println!("Loaded session {} ({})", session.meta.job_id, path.display());
        session
    } else {
        println!("Starting a new session ({})", path.display());
        let engineer = prompt_string("Engineer name []: ", "");
        let job_id = prompt_string("Job ID []: ", "");
        let scheme = prompt_string("Scheme name []: ", "");
        Session::new(engineer, job_id, scheme)
    };
    println!();

    let defaults = session.settings.defaults.clone();

    let population = prompt_f64("Design population [0]: ", 0.0);
    let mut input = defaults.input_for(population);
    input.demand_lpcd = prompt_f64(
        &format!("Per-capita demand (lpcd) [{:.0}]: ", defaults.demand_lpcd),
        defaults.demand_lpcd,
    );
    input.tank_type = prompt_tank_type(defaults.tank_type);
    input.detention_hr = prompt_f64(
        &format!("Detention time (h) [{:.1}]: ", defaults.detention_hr),
        defaults.detention_hr,
    );
    input.depth_m = prompt_f64(
        &format!("Water depth (m) [{:.1}]: ", defaults.depth_m),
        defaults.depth_m,
    );
    input.overflow_rate_l_per_m2_day = prompt_f64(
        &format!(
            "Surface overflow rate (L/m²/day) [{:.0}]: ",
            defaults.overflow_rate_l_per_m2_day
        ),
        defaults.overflow_rate_l_per_m2_day,
    );
    if input.tank_type == TankType::Horizontal {
        input.length_breadth_ratio = prompt_f64(
            &format!("Length:breadth ratio [{:.1}]: ", defaults.length_breadth_ratio),
            defaults.length_breadth_ratio,
        );
    }
    let label = prompt_string("Design label [ST-1]: ", "ST-1");

    println!();
    println!("Sizing tank...");
    println!();

    let record = DesignRecord::compute(label, input);
    print_record(&record);

    println!();
    println!("JSON Output (for LLM/API use):");
    if let Ok(json) = serde_json::to_string_pretty(&record.result) {
        println!("{}", json);
    }

    session.set_current(record);

    let lock_user = if session.meta.engineer.is_empty() {
        "clarify-cli".to_string()
    } else {
        session.meta.engineer.clone()
    };
    let _lock = FileLock::acquire(path, lock_user)?;
    save_session(&session, path)?;

    println!();
    println!("Saved session to {}", path.display());

    Ok(())
}

fn run_show(path: &Path) -> CalcResult<()> {
    let (session, lock_info) = load_session_with_lock_check(path)?;

    println!("Clarify CLI - Session Viewer");
    println!("============================");
    println!();
    println!("Session:  {} / {}", session.meta.job_id, session.meta.scheme);
    println!("Engineer: {}", session.meta.engineer);
    println!("Modified: {}", session.meta.modified.format("%Y-%m-%d %H:%M UTC"));
    if let Some(info) = lock_info {
        println!("Locked by {} on {} (read-only view)", info.user_id, info.machine);
    }
    println!();

    let record = session
        .current()
        .ok_or_else(|| CalcError::missing_design("show stored design"))?;

    // The stored result is rendered as-is, never recomputed
    print_record(record);

    Ok(())
}

fn run_report(path: &Path, out: Option<PathBuf>) -> CalcResult<()> {
    let session = load_session(path)?;
    let out_path = out.unwrap_or_else(|| path.with_extension("pdf"));

    println!("Rendering report for {}...", path.display());
    let pdf = render_session_pdf(&session)?;

    std::fs::write(&out_path, &pdf).map_err(|e| {
        CalcError::file_error("write report", out_path.display().to_string(), e.to_string())
    })?;

    println!("Wrote {} bytes to {}", pdf.len(), out_path.display());

    Ok(())
}

fn print_record(record: &DesignRecord) {
    let input = &record.inputs;
    let result = &record.result;

    println!("═══════════════════════════════════════");
    println!("  TANK DESIGN RESULTS: {}", record.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Population: {:.0} persons", input.population);
    println!("  Demand:     {:.0} lpcd", input.demand_lpcd);
    println!("  Tank type:  {}", input.tank_type.description());
    println!("  Detention:  {:.1} h", input.detention_hr);
    println!("  Depth:      {:.2} m", input.depth_m);
    println!("  SOR:        {:.0} L/m²/day", input.overflow_rate_l_per_m2_day);
    if input.tank_type == TankType::Horizontal {
        println!("  L:B ratio:  {:.1}", input.length_breadth_ratio);
    }
    println!();
    println!("Flows:");
    println!("  Q_day = {:.2} m³/day", result.daily_flow_m3);
    println!("  Q     = {:.4} m³/s", result.flow_m3_per_s);
    println!();
    println!("Sizing:");
    println!("  v0 (SOR)         = {:.2} m³/m²/day", result.overflow_rate_m3_per_m2_day);
    println!("  Plan area A      = {:.2} m²", result.plan_area_m2);
    println!("  V (detention)    = {:.2} m³", result.detention_volume_m3);
    println!("  V (area × depth) = {:.2} m³", result.area_volume_m3);
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  CONTROLLING: {} ({:.2} m³)",
        result.controlling_criterion(),
        result.controlling_volume_m3
    );
    println!("═══════════════════════════════════════");
    println!();
    println!("Geometry ({}):", result.geometry.shape_name());
    match result.geometry {
        TankGeometry::Rectangular {
            length_m,
            breadth_m,
        } => {
            println!("  L = {:.2} m", length_m);
            println!("  B = {:.2} m", breadth_m);
            println!("  d = {:.2} m", result.depth_m);
        }
        TankGeometry::Circular { diameter_m } => {
            println!("  D = {:.2} m", diameter_m);
            println!("  d = {:.2} m", result.depth_m);
        }
    }
    let (along, depth, across) = result.solid_extents_m();
    println!("  3D extents: {:.2} × {:.2} × {:.2} m", along, depth, across);
    println!();
    print_plan_sketch(result);
}

/// Rough character-cell plan sketch, for a quick sanity check of proportions
fn print_plan_sketch(result: &DesignResult) {
    let viewport = Viewport::new(48.0, 24.0, 1.0);
    let view = match plan_view(result, &viewport) {
        Ok(v) => v,
        Err(_) => return,
    };
    if view.is_degenerate() {
        return;
    }

    println!("Plan view (not to scale):");
    match view.outline {
        PlanOutline::Rectangle { width, height, .. } => {
            let w = width.round().max(2.0) as usize;
            // Terminal cells are roughly twice as tall as wide
            let h = (height / 2.0).round().max(1.0) as usize;
            println!("  ┌{}┐", "─".repeat(w));
            for _ in 0..h {
                println!("  │{}│", " ".repeat(w));
            }
            println!("  └{}┘", "─".repeat(w));
        }
        PlanOutline::Circle { .. } => {
            println!("      _____");
            println!("    /       \\");
            println!("   |    +    |");
            println!("    \\ _____ /");
        }
    }
    for dim in &view.dimensions {
        println!("  {}", dim.text);
    }
    println!();
}
