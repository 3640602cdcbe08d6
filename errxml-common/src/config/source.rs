//! Source tracking for configuration values.
//!
//! Every resolved setting remembers which layer produced it so that
//! `errxml config` can explain where a surprising value came from.

use serde::Serialize;
use std::fmt;

/// The layer a configuration value was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    /// Built-in default.
    Default,
    /// TOML config file passed with `--config`.
    File,
    /// `ERRXML_*` environment variable.
    Environment,
    /// Command-line flag.
    Cli,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::File => write!(f, "file"),
            Self::Environment => write!(f, "environment"),
            Self::Cli => write!(f, "cli"),
        }
    }
}

/// A value together with the layer it was resolved from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub value: T,
    pub source: ConfigSource,
    /// Variable name, file path, or flag that supplied the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl<T> Sourced<T> {
    pub fn default_value(value: T) -> Self {
        Self {
            value,
            source: ConfigSource::Default,
            origin: None,
        }
    }

    pub fn from_file(value: T, path: impl Into<String>) -> Self {
        Self {
            value,
            source: ConfigSource::File,
            origin: Some(path.into()),
        }
    }

    pub fn from_env(value: T, var: impl Into<String>) -> Self {
        Self {
            value,
            source: ConfigSource::Environment,
            origin: Some(var.into()),
        }
    }

    pub fn from_cli(value: T, flag: impl Into<String>) -> Self {
        Self {
            value,
            source: ConfigSource::Cli,
            origin: Some(flag.into()),
        }
    }

    /// Replace the value with `value` when present, keeping `self` otherwise.
    pub fn or_override(self, value: Option<T>, make: impl FnOnce(T) -> Sourced<T>) -> Self {
        match value {
            Some(v) => make(v),
            None => self,
        }
    }

    /// Human-readable description of where the value came from.
    pub fn describe_source(&self) -> String {
        match &self.origin {
            Some(origin) => format!("{} ({})", self.source, origin),
            None => self.source.to_string(),
        }
    }
}
