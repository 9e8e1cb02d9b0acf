//! Configuration structures for the stroke capacity simulator
//!
//! This module contains the command line interface, the partial configuration file
//! format and the merged [`SimulationConfig`] that drives an experiment.

use crate::parameters::{
    Arrivals, LengthOfStay, NamedParameters, Param, ParameterError, Routing,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stroke-capacity-sim",
    version = "0.1.0",
    about = "Stroke Capacity Simulator - Estimates bed occupancy on a stroke pathway",
    long_about = "Simulates patient flow through an Acute Stroke Unit and a Rehabilitation unit, audits bed occupancy over many replications and reports the probability of delay for each number of beds.

EXAMPLES:
    # Run with default settings
    stroke-capacity-sim

    # Use a configuration file
    stroke-capacity-sim --config scenario.json

    # Override specific settings
    stroke-capacity-sim --number-of-runs 20 --data-collection-period 365

    # Generate configuration template
    stroke-capacity-sim --print-config > scenario.json

    # Validate configuration without running
    stroke-capacity-sim --config scenario.json --dry-run

    # Save experiment results
    stroke-capacity-sim --output results.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Individual parameters can be overridden in the configuration file with a
    \"parameters\" object keyed by dotted names, e.g. \"asu_los.stroke_esd.mean\"."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Warm-up period in days
    #[arg(
        long,
        help = "Warm-up period in days",
        long_help = "Simulated days before results are collected. Must not be negative. Default: 1095"
    )]
    pub warm_up_period: Option<f64>,

    /// Data collection period in days
    #[arg(
        long,
        help = "Data collection period in days",
        long_help = "Simulated days over which occupancy is collected. Must not be negative. Default: 1825"
    )]
    pub data_collection_period: Option<f64>,

    /// Days between occupancy audits
    #[arg(long, help = "Days between occupancy audits")]
    pub audit_interval: Option<f64>,

    /// Number of replications
    #[arg(
        long,
        help = "Number of replications",
        long_help = "Number of independent replications, run with run numbers 0..N. Must be at least 1. Default: 150"
    )]
    pub number_of_runs: Option<usize>,

    /// Output path for experiment results
    #[arg(long, help = "Output path for experiment results (JSON)")]
    pub output: Option<String>,

    /// Directory for log files
    #[arg(long, help = "Write daily rolling log files to this directory")]
    pub log_dir: Option<String>,

    /// Emit logs as JSON
    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Warm-up period in days
    pub warm_up_period: Option<f64>,

    /// Data collection period in days
    pub data_collection_period: Option<f64>,

    /// Days between occupancy audits
    pub audit_interval: Option<f64>,

    /// Number of replications
    pub number_of_runs: Option<usize>,

    /// Arrivals into the Acute Stroke Unit
    pub asu_arrivals: Option<Arrivals>,

    /// Direct arrivals into the rehabilitation unit
    pub rehab_arrivals: Option<Arrivals>,

    /// Lengths of stay on the Acute Stroke Unit
    pub asu_los: Option<LengthOfStay>,

    /// Lengths of stay on the rehabilitation unit
    pub rehab_los: Option<LengthOfStay>,

    /// Routing out of the Acute Stroke Unit
    pub asu_routing: Option<Routing>,

    /// Routing out of the rehabilitation unit
    pub rehab_routing: Option<Routing>,

    /// Individual parameter overrides keyed by dotted name
    pub parameters: Option<BTreeMap<String, f64>>,

    /// Output path for experiment results
    pub output: Option<String>,
}

/// Configuration for a stroke capacity experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimulationConfig {
    /// Model parameters
    #[serde(flatten)]
    pub param: Param,

    /// Output path for experiment results
    pub output: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// A parameter override named an unknown parameter
    #[error("Invalid parameter override: {0}")]
    Parameter(#[from] ParameterError),
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Self::from_config_file(config_file)
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    ///
    /// Whole records replace the defaults first; named overrides are then applied
    /// through the parameter name guard.
    pub fn from_config_file(config_file: ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Param::default();

        let mut param = Param {
            asu_arrivals: config_file.asu_arrivals.unwrap_or(defaults.asu_arrivals),
            rehab_arrivals: config_file.rehab_arrivals.unwrap_or(defaults.rehab_arrivals),
            asu_los: config_file.asu_los.unwrap_or(defaults.asu_los),
            rehab_los: config_file.rehab_los.unwrap_or(defaults.rehab_los),
            asu_routing: config_file.asu_routing.unwrap_or(defaults.asu_routing),
            rehab_routing: config_file.rehab_routing.unwrap_or(defaults.rehab_routing),
            warm_up_period: config_file.warm_up_period.unwrap_or(defaults.warm_up_period),
            data_collection_period: config_file
                .data_collection_period
                .unwrap_or(defaults.data_collection_period),
            audit_interval: config_file.audit_interval.unwrap_or(defaults.audit_interval),
            number_of_runs: config_file.number_of_runs.unwrap_or(defaults.number_of_runs),
        };

        for (name, value) in config_file.parameters.unwrap_or_default() {
            param.set_parameter(&name, value)?;
        }

        Ok(Self { param, output: config_file.output })
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.warm_up_period {
            config.param.warm_up_period = value;
        }
        if let Some(value) = args.data_collection_period {
            config.param.data_collection_period = value;
        }
        if let Some(value) = args.audit_interval {
            config.param.audit_interval = value;
        }
        if let Some(value) = args.number_of_runs {
            config.param.number_of_runs = value;
        }
        if let Some(value) = args.output {
            config.output = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.param.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LosCategory, PatientType};

    fn empty_args() -> CliArgs {
        CliArgs {
            config: None,
            warm_up_period: None,
            data_collection_period: None,
            audit_interval: None,
            number_of_runs: None,
            output: None,
            log_dir: None,
            json_logs: false,
            verbose: false,
            debug: false,
            dry_run: false,
            print_config: false,
        }
    }

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();

        assert_eq!(config.param, Param::default());
        assert!(config.output.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "warm_up_period": 30.0,
            "data_collection_period": 60.0,
            "number_of_runs": 4,
            "parameters": {
                "asu_arrivals.stroke": 2.5,
                "rehab_los.neuro.sd": 20.0
            },
            "output": "results.json"
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.param.warm_up_period, 30.0);
        assert_eq!(config.param.data_collection_period, 60.0);
        assert_eq!(config.param.number_of_runs, 4);
        assert_eq!(config.param.audit_interval, 1.0);
        assert_eq!(config.param.asu_arrivals.mean_iat(PatientType::Stroke), Some(2.5));
        assert_eq!(config.param.rehab_los.get(LosCategory::Neuro).unwrap().sd, 20.0);
        assert_eq!(config.output.as_deref(), Some("results.json"));
    }

    #[test]
    fn test_config_file_unknown_parameter() {
        let config_file = ConfigFile {
            parameters: Some(BTreeMap::from([("asu_arrivals.strok".to_string(), 2.0)])),
            ..Default::default()
        };

        let err = SimulationConfig::from_config_file(config_file).unwrap_err();
        assert!(matches!(err, ConfigError::Parameter(ParameterError::UnknownAttribute { .. })));
    }

    #[test]
    fn test_config_file_replaces_whole_record() {
        let rehab = Arrivals::new(crate::types::Unit::Rehab, [(PatientType::Stroke, 10.0)]);
        let config_file = ConfigFile { rehab_arrivals: Some(rehab.clone()), ..Default::default() };

        let config = SimulationConfig::from_config_file(config_file).unwrap();
        assert_eq!(config.param.rehab_arrivals, rehab);
        assert_eq!(config.param.asu_arrivals, Arrivals::asu_default());
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        assert!(matches!(
            SimulationConfig::from_file("does/not/exist.json"),
            Err(ConfigError::FileNotFound(_))
        ));

        let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            SimulationConfig::from_file(temp_file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs {
            warm_up_period: Some(5.0),
            number_of_runs: Some(3),
            output: Some("out.json".to_string()),
            ..empty_args()
        };

        let config = SimulationConfig::from_cli_args(args).unwrap();

        assert_eq!(config.param.warm_up_period, 5.0);
        assert_eq!(config.param.number_of_runs, 3);
        assert_eq!(config.output.as_deref(), Some("out.json"));
        assert_eq!(config.param.data_collection_period, 1825.0);
    }

    #[test]
    fn test_print_and_save_round_trip() {
        let config = SimulationConfig::default();
        let json = config.print_json().unwrap();
        assert!(json.contains("\"warm_up_period\": 1095.0"));

        let temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        config.save_to_file(temp_file.path()).unwrap();
        let saved: SimulationConfig =
            serde_json::from_str(&fs::read_to_string(temp_file.path()).unwrap()).unwrap();
        assert_eq!(saved, config);
    }
}
