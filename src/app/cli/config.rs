//! TOML configuration file loading and settings resolution
//!
//! Settings come from three layers: built-in defaults, the configuration file
//! and the command line, with later layers taking precedence.

use crate::app::cli::args::Args;
use crate::core::error_handling::ContextualError;
use crate::core::logging::LogFormat;
use crate::queue::api::PoolConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    Invalid { message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::NotFound { .. } => Some("The specified configuration file does not exist"),
            ConfigError::Parse { .. } => Some("The configuration file is not valid TOML"),
            ConfigError::Invalid { message } => Some(message.as_str()),
            ConfigError::Read { .. } => None,
        }
    }
}

/// Contents of `handoffq.toml`
///
/// ```toml
/// pool-size = 8
/// log-level = "debug"
/// log-format = "ext"
/// log-file = "/tmp/handoffq.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub pool_size: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Default location: `<config_dir>/Handoffq/handoffq.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Handoffq").join("handoffq.toml"))
    }

    /// Load the configuration file
    ///
    /// An explicitly given file must exist. Without one, the default location
    /// is used if present, otherwise defaults apply.
    pub async fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::trace!("No configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
        Self::parse(&contents, &path)
    }

    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == Some(0) {
            return Err(ConfigError::Invalid {
                message: "pool-size must be greater than 0".to_string(),
            });
        }
        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "log-level '{}' is not one of: {}",
                        level,
                        LOG_LEVELS.join(", ")
                    ),
                });
            }
        }
        if let Some(format) = &self.log_format {
            parse_log_format(format)?;
        }
        Ok(())
    }
}

fn parse_log_format(format: &str) -> Result<LogFormat, ConfigError> {
    LogFormat::from_str(format).map_err(|_| ConfigError::Invalid {
        message: format!("log-format '{}' is not one of: text, ext, json", format),
    })
}

/// Effective settings after merging defaults, configuration file and CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub pool: PoolConfig,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
    pub color: bool,
    pub script: Option<PathBuf>,
}

impl Settings {
    /// Merge `args` over `file`; `stdout_is_tty` decides colour when neither says
    pub fn resolve(args: &Args, file: &FileConfig, stdout_is_tty: bool) -> Result<Self, ConfigError> {
        let log_format = match args.log_format.as_ref().or(file.log_format.as_ref()) {
            Some(format) => parse_log_format(format)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            pool: PoolConfig {
                pool_size: args.pool_size.or(file.pool_size),
            },
            log_level: args.log_level.clone().or_else(|| file.log_level.clone()),
            log_format,
            log_file: args.log_file.clone().or_else(|| file.log_file.clone()),
            color: args.color.unwrap_or(stdout_is_tty),
            script: args.script.clone(),
        })
    }
}
