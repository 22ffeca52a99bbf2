use std::path::PathBuf;

use clap::Parser;
use experiment_gate::conditions::ConditionRegistry;
use experiment_gate::export::report::write_report;
use experiment_gate::export::trace::write_trace;
use experiment_gate::orbits::Telemetry;
use experiment_gate::scenario::load_scenario;
use experiment_gate::trace::{load_snapshot, load_trace, replay};
use tracing_subscriber::EnvFilter;

/// Evaluate a scenario's conditions against recorded telemetry.
#[derive(Parser, Debug)]
#[command(author, version, about = "Experiment gate condition evaluator")]
struct Cli {
    /// Scenario file (YAML/TOML) or directory of condition files
    #[arg(long)]
    conditions: PathBuf,

    /// Single telemetry snapshot (YAML)
    #[arg(long, conflicts_with = "trace", required_unless_present = "trace")]
    telemetry: Option<PathBuf>,

    /// Telemetry trace (YAML sequence of `elapsed_s` + `snapshot`)
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Seconds since the previous tick, for a single snapshot
    #[arg(long, default_value_t = 0.0)]
    elapsed: f64,

    /// Write a JSON evaluation report for a single snapshot
    #[arg(long)]
    report: Option<PathBuf>,

    /// Trace CSV output (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = ConditionRegistry::with_builtin();
    let mut scenario = load_scenario(&cli.conditions, &registry)?;

    if let Some(trace_path) = &cli.trace {
        let samples = load_trace(trace_path)?;
        let records = replay(&mut scenario, &samples);
        write_trace(&cli.output, &records)?;
        return Ok(());
    }

    let Some(telemetry_path) = &cli.telemetry else {
        anyhow::bail!("either --telemetry or --trace is required");
    };
    let snapshot = load_snapshot(telemetry_path)?;
    let outcome = scenario.evaluate(&snapshot, cli.elapsed);

    println!("=== {} ===", scenario.name);
    println!(
        "Telemetry : {} | Ap = {:.1} m, Pe = {:.1} m, e = {:.4}, i = {:.2} deg, v = {:.1} m/s",
        snapshot.body_name,
        snapshot.apoapsis_altitude_m(),
        snapshot.periapsis_altitude_m(),
        snapshot.eccentricity,
        snapshot.inclination_deg,
        snapshot.orbital_speed_m_s
    );
    for (index, (condition, result)) in scenario
        .conditions
        .iter()
        .zip(scenario.conditions.outcomes())
        .enumerate()
    {
        println!("[{index}] {} -> {result}", condition.name());
        for line in condition.diagnostic().lines() {
            println!("    {line}");
        }
    }
    println!("Outcome   : {outcome}");

    if let Some(report_path) = &cli.report {
        write_report(report_path, &scenario.report(cli.elapsed, outcome))?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
