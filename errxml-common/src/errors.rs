//! Error types for errxml.
//!
//! Reading the input is the only thing that can fail at run time. Everything
//! else that can go wrong happens while resolving configuration.

use crate::config::EnvError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration could not be resolved into a usable generator.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error-code marker must not be empty")]
    EmptyMarker,

    #[error("Failed to compile line pattern for marker '{marker}'")]
    Pattern {
        marker: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read config file {}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}", path.display())]
    FileInvalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid environment configuration: {}", join_env_errors(.0))]
    Environment(Vec<EnvError>),
}

fn join_env_errors(errors: &[EnvError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures of a generator run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The input source could not be opened or read to the end.
    #[error("Cannot read input file {}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
