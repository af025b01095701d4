//! Mazeduel - turn-based maze duel engine
//!
//! Main entry point: parses command-line options and runs one unattended
//! match in continuous mode, printing the report when it ends.

use mazeduel::{run_match, MatchSettings, RunConfig};

fn print_usage() {
    println!("Usage: mazeduel [options]");
    println!();
    println!("Options:");
    println!("  --width <n>         Maze width in cells (default 8)");
    println!("  --height <n>        Maze height in cells (default 8)");
    println!("  --seed <n>          Fix the maze generator seed");
    println!("  --script-a <text>   Command script for combatant A");
    println!("  --script-b <text>   Command script for combatant B");
    println!("  --step-delay <s>    Seconds between script actions");
    println!("  --edit-limit <s>    Edit timer in seconds");
    println!("  --max-updates <n>   Update cap before calling a draw");
    println!("  --fast              Skip pacing delays");
    println!("  --log               Write a session event log file");
    println!("  --quiet             Suppress console logging");
    println!("  --help              Show this help");
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let flag = |name: &str| args.iter().any(|a| a == name);
    let value = |name: &str| {
        args.iter()
            .position(|a| a == name)
            .and_then(|i| args.get(i + 1).cloned())
    };

    let mut settings = MatchSettings::load();
    // write the file on first run so the knobs are discoverable
    if !std::path::Path::new(mazeduel::settings::SETTINGS_FILE).exists() {
        if let Err(e) = settings.save() {
            eprintln!("could not save initial settings: {e}");
        }
    }
    if let Some(delay) = value("--step-delay").and_then(|s| s.parse().ok()) {
        settings.step_delay = delay;
    }
    if let Some(limit) = value("--edit-limit").and_then(|s| s.parse().ok()) {
        settings.edit_time_limit = limit;
    }

    let mut config = RunConfig {
        settings,
        script_a: value("--script-a"),
        script_b: value("--script-b"),
        fast: flag("--fast"),
        file_logging: flag("--log"),
        console_logging: !flag("--quiet"),
        ..Default::default()
    };
    if let Some(width) = value("--width").and_then(|s| s.parse().ok()) {
        config.width = width;
    }
    if let Some(height) = value("--height").and_then(|s| s.parse().ok()) {
        config.height = height;
    }
    if let Some(seed) = value("--seed").and_then(|s| s.parse().ok()) {
        config.seed = Some(seed);
    }
    if let Some(cap) = value("--max-updates").and_then(|s| s.parse().ok()) {
        config.max_updates = cap;
    }

    let report = run_match(config);

    println!();
    match report.outcome {
        Some((winner, reason)) => {
            println!("winner: {winner} ({reason:?})");
        }
        None => {
            println!("draw: update cap reached");
        }
    }
    println!("turns: {}", report.turns);
    println!("updates: {}", report.updates);
}
