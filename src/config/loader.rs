//! Configuration loading from disk and the command line.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::cli::Cli;
use crate::config::schema::SidecarConfig;
use crate::config::validation::{validate_config, Settings, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a configuration from a TOML file. Not validated.
pub fn load_config(path: &Path) -> Result<SidecarConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}

/// Parse a configuration from TOML text. Not validated.
pub fn parse_config(content: &str) -> Result<SidecarConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Build the effective configuration: defaults, then the file, then flags.
pub fn resolve(cli: Cli) -> Result<SidecarConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SidecarConfig::default(),
    };
    cli.apply(&mut config);
    Ok(config)
}

/// Validate an effective configuration into runtime settings.
pub fn settings(config: &SidecarConfig) -> Result<Settings, ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)
}
