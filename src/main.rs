//! grid-alloc entry point: CLI wiring and config-driven day simulation.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};

use grid_alloc::config::ScenarioConfig;
use grid_alloc::io::export::{export_csv, export_summary_json};
use grid_alloc::logging;
use grid_alloc::reporting::print_day_report;

/// Hour-by-hour minimum-cost energy allocation over a simulated day.
#[derive(Parser, Debug)]
#[command(name = "grid-alloc", version)]
#[command(after_help = "If neither --scenario nor --preset is given, the baseline preset is used.")]
struct Cli {
    /// Load scenario from a TOML config file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, diesel_outage, noisy_demand)
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Override the demand jitter seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the tolerance band half-width in percent
    #[arg(long, value_name = "PCT")]
    tolerance_pct: Option<u32>,

    /// Export hourly results to CSV
    #[arg(long, value_name = "PATH")]
    telemetry_out: Option<PathBuf>,

    /// Export the final statistics to JSON
    #[arg(long, value_name = "PATH")]
    summary_out: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_scenario(cli: &Cli) -> ScenarioConfig {
    let loaded = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };

    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut scenario = load_scenario(&cli);

    if let Some(seed) = cli.seed {
        scenario.demand.seed = seed;
    }
    if let Some(pct) = cli.tolerance_pct {
        scenario.simulation.tolerance_pct = pct;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        process::exit(1);
    }

    info!(
        resources = scenario.resources.len(),
        districts = scenario.demand.districts.len(),
        tolerance_pct = scenario.simulation.tolerance_pct,
        "scenario loaded"
    );

    let mut simulation = scenario.build_simulation();
    let results = simulation.run();
    let resources = simulation.allocator().resources();
    let district_names = simulation.demand().district_names();

    if let Err(e) = print_day_report(&results, &district_names, resources, simulation.stats()) {
        error!("failed to write report: {e}");
        process::exit(1);
    }

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&results, resources, path) {
            error!("failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "telemetry written");
    }

    if let Some(ref path) = cli.summary_out {
        if let Err(e) = export_summary_json(simulation.stats(), path) {
            error!("failed to write summary: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "summary written");
    }
}
