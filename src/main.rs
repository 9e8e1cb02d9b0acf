// Stroke Capacity Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/stroke-capacity-sim
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/stroke-capacity-sim --config scenario.json --number-of-runs 20 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use std::process;
use stroke_capacity_sim::simulation::{ExperimentResults, LoggingConfig, Runner};
use stroke_capacity_sim::types::{CliArgs, SimulationConfig, Unit};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let mut logging = LoggingConfig::new();
    if args.debug {
        logging = logging.with_level(tracing::Level::DEBUG).with_span_events();
    } else if args.verbose {
        logging = logging.with_level(tracing::Level::INFO);
    }
    if args.json_logs {
        logging = logging.with_json_format();
    }
    if let Some(dir) = &args.log_dir {
        logging = logging.with_file_logging(dir.clone());
    }

    // Held until exit so buffered file logs are flushed.
    let _log_guard = match logging.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    info!("Starting Stroke Capacity Simulator");

    let dry_run = args.dry_run;
    let config = SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_startup_banner(&config);

    let results = Runner::new(config.param.clone())
        .run_reps()
        .context("Simulation failed")?;

    print_results(&results);

    if let Some(path) = &config.output {
        results
            .save_json(path)
            .with_context(|| format!("Failed to write results to {}", path))?;
        eprintln!("Results written to: {}", path);
    }

    info!("Stroke Capacity Simulator completed successfully");
    Ok(())
}

fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Stroke Capacity Simulator v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("=====================================");
    print_configuration_summary(config);
    eprintln!();
}

fn print_configuration_summary(config: &SimulationConfig) {
    let param = &config.param;
    eprintln!("Configuration Summary:");
    eprintln!("  Warm-up period: {} days", param.warm_up_period);
    eprintln!("  Data collection period: {} days", param.data_collection_period);
    eprintln!("  Audit interval: {} days", param.audit_interval);
    eprintln!("  Replications: {}", param.number_of_runs);
    for unit in Unit::ALL {
        let arrivals: Vec<String> = param
            .arrivals(unit)
            .iter()
            .map(|(patient_type, mean)| format!("{}={}", patient_type.as_str(), mean))
            .collect();
        eprintln!("  {} mean inter-arrival times: {}", unit, arrivals.join(", "));
    }
    if let Some(output) = &config.output {
        eprintln!("  Output: {}", output);
    }
}

fn print_results(results: &ExperimentResults) {
    let patients: usize = results.runs.iter().map(|r| r.total_patients()).sum();
    let transfers: usize = results.runs.iter().map(|r| r.transfers_to_rehab).sum();
    eprintln!("Completed {} replications", results.runs.len());
    eprintln!("  Patients recorded: {}", patients);
    eprintln!("  Transfers to rehab: {}", transfers);
    eprintln!();

    for unit in Unit::ALL {
        println!("{}", results.occupancy(unit));
    }
}
