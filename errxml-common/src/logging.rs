//! Logging setup.
//!
//! Logs go to stderr through a non-blocking writer; stdout is reserved for
//! the generated program.

use crate::config::{EnvError, EnvParser, Sourced};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    env_errors: Vec<EnvError>,
}

impl LogConfig {
    /// Read `ERRXML_LOG_LEVEL` and `ERRXML_LOG_FORMAT`, falling back to
    /// `default_level` and pretty output. Invalid values are reported as
    /// warnings once logging is up.
    pub fn from_env(default_level: &str) -> Self {
        let mut parser = EnvParser::new();
        let level = parser.get_log_level(
            "LOG_LEVEL",
            Sourced::default_value(default_level.to_string()),
        );
        let format = parser.get_choice(
            "LOG_FORMAT",
            &["pretty", "json"],
            Sourced::default_value("pretty".to_string()),
        );

        Self {
            level: level.value,
            format: format.value.parse().unwrap_or_default(),
            env_errors: parser.take_errors(),
        }
    }

    pub fn with_level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Filter directive covering the errxml crates only.
    pub fn directive(&self) -> String {
        format!("errxml={0},errxml_common={0}", self.level)
    }
}

/// Keeps the background log writer alive. Drop it last to flush.
#[derive(Debug)]
pub struct LoggingGuards {
    _stderr: WorkerGuard,
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuards> {
    let filter = EnvFilter::try_new(config.directive())
        .with_context(|| format!("Invalid log level '{}'", config.level))?;
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let ansi = std::io::stderr().is_terminal();

    let installed = match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(writer)
            .try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    for err in &config.env_errors {
        tracing::warn!("{}", err);
    }

    Ok(LoggingGuards { _stderr: guard })
}
