use state_search::config::{Cli, Config};
use state_search::problem;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        Config::load_from_file(config_file)?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;
    config.validate()?;

    let report = problem::run(&config)?;
    if report.solutions.is_empty() {
        info!("No solution found");
    }
    for (index, solution) in report.solutions.iter().enumerate() {
        info!(
            "Solution {} with cost {}: {}",
            index + 1,
            solution.cost,
            solution.path.join(" -> ")
        );
    }
    report.stats.print();

    if let Some(output_path) = config.output_path.as_ref() {
        report.write_json(output_path)?;
        info!("Report written to {output_path}");
    }

    Ok(())
}
