use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::observability::LogFormat;

/// What the binary does with the rule pack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Evaluate and execute rules, printing the resulting facts
    #[default]
    Fire,
    /// Evaluate rules only, printing each rule's result
    Check,
}

/// Rules engine configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "plainrules")]
#[command(about = "Fail-fast rules engine")]
pub struct Config {
    /// Path to a YAML or JSON file holding the facts
    #[arg(long, default_value = "facts.yaml", env = "PLAINRULES_FACTS_PATH")]
    pub facts_path: PathBuf,

    /// Fire the rules or only check them
    #[arg(long, value_enum, default_value_t = Mode::Fire, env = "PLAINRULES_MODE")]
    pub mode: Mode,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "PLAINRULES_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Run the engine at all; when false nothing is fired
    #[arg(long, default_value_t = true, action = ArgAction::Set, env = "PLAINRULES_ENABLED")]
    pub enabled: bool,

    /// Print engine counters in Prometheus format after the run
    #[arg(long, env = "PLAINRULES_PRINT_METRICS")]
    pub print_metrics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            facts_path: PathBuf::from("facts.yaml"),
            mode: Mode::Fire,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            enabled: true,
            print_metrics: false,
        }
    }
}
