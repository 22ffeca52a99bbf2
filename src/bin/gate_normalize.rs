use std::path::PathBuf;

use clap::Parser;
use experiment_gate::conditions::ConditionRegistry;
use experiment_gate::config::to_yaml_string;
use experiment_gate::scenario::{load_scenario, save_scenario};
use tracing_subscriber::EnvFilter;

/// Rewrite a scenario with every condition key spelled out.
///
/// Unparsable values are replaced by their defaults (a warning is logged for each).
#[derive(Parser, Debug)]
#[command(author, version, about = "Experiment gate scenario normalizer")]
struct Cli {
    /// Scenario file (YAML/TOML) or directory of condition files
    #[arg(long)]
    input: PathBuf,

    /// Output YAML file (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let registry = ConditionRegistry::with_builtin();
    let scenario = load_scenario(&cli.input, &registry)?;

    if cli.output.as_os_str() == "-" {
        print!("{}", to_yaml_string(&scenario.to_node())?);
    } else {
        save_scenario(&cli.output, &scenario)?;
        eprintln!(
            "[info] wrote {} condition(s) to {}",
            scenario.conditions.len(),
            cli.output.display()
        );
    }
    Ok(())
}
