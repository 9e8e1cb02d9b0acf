//! Tests for CLI argument parsing functionality
//!
//! These tests verify that command line arguments are parsed and layered over
//! configuration files and defaults.

use clap::Parser;
use std::io::Write;
use stroke_capacity_sim::types::config::{CliArgs, SimulationConfig};

#[test]
fn test_defaults_when_no_arguments() {
    let cli_args = CliArgs::try_parse_from(["test"]).unwrap();
    assert!(cli_args.config.is_none());
    assert!(!cli_args.verbose && !cli_args.debug && !cli_args.dry_run);

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config, SimulationConfig::default());
}

#[test]
fn test_period_arguments() {
    let cli_args = CliArgs::try_parse_from([
        "test",
        "--warm-up-period",
        "100",
        "--data-collection-period",
        "365.5",
        "--audit-interval",
        "0.5",
        "--number-of-runs",
        "10",
    ])
    .unwrap();

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.param.warm_up_period, 100.0);
    assert_eq!(config.param.data_collection_period, 365.5);
    assert_eq!(config.param.audit_interval, 0.5);
    assert_eq!(config.param.number_of_runs, 10);
    config.validate().unwrap();
}

#[test]
fn test_flags() {
    let cli_args = CliArgs::try_parse_from([
        "test", "-v", "-d", "--dry-run", "--json-logs", "--log-dir", "logs", "--output", "out.json",
    ])
    .unwrap();
    assert!(cli_args.verbose);
    assert!(cli_args.debug);
    assert!(cli_args.dry_run);
    assert!(cli_args.json_logs);
    assert_eq!(cli_args.log_dir.as_deref(), Some("logs"));
    assert_eq!(cli_args.output.as_deref(), Some("out.json"));
}

#[test]
fn test_invalid_argument_values() {
    assert!(CliArgs::try_parse_from(["test", "--number-of-runs", "many"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--unknown-flag"]).is_err());

    let cli_args = CliArgs::try_parse_from(["test", "--number-of-runs", "0"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_err());
}

/// CLI arguments take precedence over the configuration file
#[test]
fn test_cli_overrides_config_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"warm_up_period": 50.0, "number_of_runs": 5}}"#).unwrap();
    file.flush().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let cli_args =
        CliArgs::try_parse_from(["test", "--config", path.as_str(), "--number-of-runs", "2"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.param.warm_up_period, 50.0);
    assert_eq!(config.param.number_of_runs, 2);
}

/// The printed configuration can be loaded back as a configuration file
#[test]
fn test_printed_config_is_loadable() {
    let json = SimulationConfig::default().print_json().unwrap();
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();

    let loaded = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(loaded, SimulationConfig::default());
}
