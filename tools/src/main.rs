//! schedule-it: fill a month's duty roster from CSV input.
//!
//! Usage:
//!   schedule-it 2025 3
//!   schedule-it 2025 3 diff_avail_file.csv my_holiday_list.csv VERBOSE
//!   schedule-it 2025 3 --seed 12345 --out march.csv --config roster.json

use anyhow::{Context, Result};
use roster_core::{
    config::RosterConfig,
    engine::{schedule_month, RosterReport},
    event::RosterEvent,
    input::{load_holidays, load_workforce},
    output::save_schedule,
    types::Scope,
};
use std::env;
use std::process;

const USAGE: &str = "YEAR_NUM MONTH_NUM [availability.csv] [holidays.csv] [VERBOSE] \
                     [--seed N] [--out PATH] [--config PATH] [--json]";

const VALUE_FLAGS: [&str; 3] = ["--seed", "--out", "--config"];

#[derive(serde::Serialize)]
struct RunSummary<'a> {
    year:            i32,
    month:           u32,
    seed:            u64,
    output:          &'a str,
    working_days:    usize,
    slots_required:  usize,
    slots_unfilled:  usize,
    complete:        bool,
    warnings:        Vec<&'a RosterEvent>,
    failures:        Vec<&'a RosterEvent>,
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let positional = positional_args(&args);

    if positional.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let (year, month) = match (positional[0].parse::<i32>(), positional[1].parse::<u32>()) {
        (Ok(y), Ok(m)) => (y, m),
        _ => {
            eprintln!("Error: Invalid input. YEAR and MONTH must be integers and the");
            eprintln!("  first two arguments");
            process::exit(1);
        }
    };
    let available = positional.get(2).map(String::as_str).unwrap_or("availability.csv");
    let holidays_path = positional.get(3).map(String::as_str).unwrap_or("holidays.csv");
    let verbose = positional.get(4).is_some_and(|v| v.eq_ignore_ascii_case("verbose"))
        || args.iter().any(|a| a == "--verbose");
    let json = args.iter().any(|a| a == "--json");

    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let (seed, out, config_path) = match parse_flags(&args) {
        Ok(flags) => flags,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            process::exit(1);
        }
    };
    let seed = seed.unwrap_or_else(wall_clock_seed);
    let out = out.unwrap_or("flat_sched.csv");
    let config = match config_path {
        Some(path) => RosterConfig::load(path).with_context(|| format!("loading config {path}"))?,
        None => RosterConfig::default(),
    };

    if !json {
        println!("schedule-it");
        println!("  month:         {year}-{month:02}");
        println!("  seed:          {seed}");
        println!("  availability:  {available}");
        println!("  holidays:      {holidays_path}");
        println!("  output:        {out}");
        println!();
    }

    let holidays = match load_holidays(holidays_path) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Error: could not read {holidays_path} file or it is not formatted");
            eprintln!("  correctly. Holidays should be in MM/DD/YYYY format ({e})");
            process::exit(1);
        }
    };
    let workforce = load_workforce(available)
        .with_context(|| format!("reading availability from {available}"))?;

    let report = schedule_month(year, month, &holidays, &workforce, &config, seed)
        .with_context(|| format!("building calendar for {year}-{month}"))?;

    // Completeness problems are already logged; the roster is written regardless.
    save_schedule(&report.calendar, out).with_context(|| format!("writing {out}"))?;
    log::info!("roster for {year}-{month:02} written to {out}");

    if json {
        let summary = build_summary(&report, out);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&report, out);
    }
    Ok(())
}

fn build_summary<'a>(report: &'a RosterReport, out: &'a str) -> RunSummary<'a> {
    let calendar = &report.calendar;
    RunSummary {
        year:           calendar.year,
        month:          calendar.month,
        seed:           report.seed,
        output:         out,
        working_days:   calendar.working_days().count(),
        slots_required: calendar.required(Scope::Both),
        slots_unfilled: calendar.unfilled(Scope::Both),
        complete:       report.is_complete(),
        warnings:       report.warnings().collect(),
        failures:       report.failures().collect(),
    }
}

fn print_summary(report: &RosterReport, out: &str) {
    let summary = build_summary(report, out);

    println!("=== ROSTER SUMMARY ===");
    println!("  month:          {}-{:02}", summary.year, summary.month);
    println!("  seed:           {}", summary.seed);
    println!("  working days:   {}", summary.working_days);
    println!("  slots filled:   {}/{}",
        summary.slots_required - summary.slots_unfilled, summary.slots_required);
    println!("  warnings:       {}", summary.warnings.len());
    println!("  failures:       {}", summary.failures.len());
    println!("  written to:     {}", summary.output);

    for event in summary.warnings.iter().chain(summary.failures.iter()) {
        println!("  {:<22} {}", event.type_name(), describe(event));
    }

    if !summary.complete {
        println!();
        println!("  Roster is incomplete: open slots are marked NONE for manual filling.");
    }
}

fn describe(event: &RosterEvent) -> String {
    match event {
        RosterEvent::PlacementWarning { phase, worker, reason } => {
            format!("{worker} ({}): {reason}", phase.name())
        }
        RosterEvent::CompletenessFailure { phase, scope, unfilled, .. } => {
            format!("{}: {scope:?} has {unfilled} open slots", phase.name())
        }
        other => format!("{other:?}"),
    }
}

fn print_usage() {
    let pname = "schedule-it";
    println!("Usage: {pname} {USAGE}");
    println!("Example: {pname} 2025 3");
    println!("   ^^^^^^ assumes files are availability.csv and holidays.csv");
    println!("Example: {pname} 2025 3 diff_avail_file.csv my_holiday_list.csv");
}

/// Arguments after the program name that are not flags or flag values.
fn positional_args(args: &[String]) -> Vec<String> {
    let mut positional = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            positional.push(arg.clone());
        }
    }
    positional
}

/// `--seed`, `--out` and `--config`, each optional. A flag given
/// without a value, or a seed that is not a number, is an error.
fn parse_flags(args: &[String]) -> Result<(Option<u64>, Option<&str>, Option<&str>), String> {
    let seed = flag_value(args, "--seed")?
        .map(|v| v.parse::<u64>().map_err(|_| format!("--seed expects a non-negative integer, got {v:?}")))
        .transpose()?;
    let out = flag_value(args, "--out")?;
    let config = flag_value(args, "--config")?;
    Ok((seed, out, config))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, String> {
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    match args.get(pos + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => Err(format!("{flag} needs a value")),
    }
}

/// Seed used when none is given. Printed in the summary so the
/// exact roster can be regenerated with --seed.
fn wall_clock_seed() -> u64 {
    chrono::Utc::now().timestamp_micros() as u64
}
