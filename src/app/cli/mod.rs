//! Command-line arguments, configuration file and script parsing

pub mod args;
pub mod config;
pub mod script;

pub use args::Args;
pub use config::{ConfigError, FileConfig, Settings};
pub use script::{parse_line, ScriptCommand};

#[cfg(test)]
mod tests;
