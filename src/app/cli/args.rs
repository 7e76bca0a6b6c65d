//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "handoffq")]
#[command(about = "Drive a pool of handoff queues from a command script")]
#[command(version)]
#[command(after_help = "Script commands: set, enqueue, wait, dequeue, watch, status, remove, clear, list, log")]
pub struct Args {
    /// Script file to run (reads stdin when omitted)
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Maximum number of queues in the pool (unbounded when omitted)
    #[arg(short = 's', long = "pool-size", value_name = "COUNT", value_parser = validate_positive_int)]
    pub pool_size: Option<usize>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Color output control: unspecified = auto-detect terminal
    #[arg(short = 'g', long = "color")]
    pub color: Option<bool>,
}

/// Validate positive integer value
pub fn validate_positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}
