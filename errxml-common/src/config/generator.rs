//! Generator settings and their layered resolution.
//!
//! The marker and the vendor code-space base belong to the collaborating C
//! library, so they are settings rather than constants baked into the
//! matcher. Resolution order: CLI > environment > config file > defaults.

use super::env::EnvParser;
use super::file::ConfigFile;
use super::source::Sourced;
use crate::errors::ConfigError;
use crate::extract::ExtractConfig;
use crate::render::ProgramTemplate;
use serde::Serialize;
use std::path::Path;

/// Input file scanned when no path is given.
pub const DEFAULT_INPUT: &str = "nanomsg_labview.c";

/// Marker preceding the decimal offset in `case` lines.
pub const DEFAULT_MARKER: &str = "ERROR_BASE+";

/// Marker used by older revisions of the C wrapper.
pub const HISTORICAL_MARKER: &str = "NN_HAUSNUMERO+";

/// Offset mapping library error numbers into the LabVIEW code space.
pub const DEFAULT_CODE_BASE: u64 = 156_384_712;

pub const DEFAULT_LOOKUP_FN: &str = "nn_strerror";

pub const DEFAULT_INCLUDE: &str = "nanomsg/nn.h";

pub const DEFAULT_COMMENT: &str = "NANOMSG library error codes";

/// Effective generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorConfig {
    pub marker: String,
    pub code_base: u64,
    pub lookup_fn: String,
    pub include: String,
    pub comment: String,
    pub loose_spacing: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            code_base: DEFAULT_CODE_BASE,
            lookup_fn: DEFAULT_LOOKUP_FN.to_string(),
            include: DEFAULT_INCLUDE.to_string(),
            comment: DEFAULT_COMMENT.to_string(),
            loose_spacing: false,
        }
    }
}

impl GeneratorConfig {
    pub fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            marker: self.marker.clone(),
            loose_spacing: self.loose_spacing,
        }
    }

    pub fn template(&self) -> ProgramTemplate {
        ProgramTemplate {
            include: self.include.clone(),
            lookup_fn: self.lookup_fn.clone(),
            comment: self.comment.clone(),
            code_base: self.code_base,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub marker: Option<String>,
    pub code_base: Option<u64>,
    pub lookup_fn: Option<String>,
    pub include: Option<String>,
    pub comment: Option<String>,
    pub loose_spacing: Option<bool>,
}

/// Generator settings with the layer each value came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub marker: Sourced<String>,
    pub code_base: Sourced<u64>,
    pub lookup_fn: Sourced<String>,
    pub include: Sourced<String>,
    pub comment: Sourced<String>,
    pub loose_spacing: Sourced<bool>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let defaults = GeneratorConfig::default();
        Self {
            marker: Sourced::default_value(defaults.marker),
            code_base: Sourced::default_value(defaults.code_base),
            lookup_fn: Sourced::default_value(defaults.lookup_fn),
            include: Sourced::default_value(defaults.include),
            comment: Sourced::default_value(defaults.comment),
            loose_spacing: Sourced::default_value(defaults.loose_spacing),
        }
    }
}

impl ResolvedConfig {
    /// Resolve defaults, then the optional config file, then `ERRXML_*` variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut resolved = Self::default();
        if let Some(path) = config_file {
            let file = ConfigFile::load(path)?;
            resolved = resolved.with_file(file, &path.display().to_string());
        }
        resolved.with_env()
    }

    pub fn with_file(self, file: ConfigFile, path: &str) -> Self {
        Self {
            marker: self
                .marker
                .or_override(file.marker, |v| Sourced::from_file(v, path)),
            code_base: self
                .code_base
                .or_override(file.code_base, |v| Sourced::from_file(v, path)),
            lookup_fn: self
                .lookup_fn
                .or_override(file.lookup_fn, |v| Sourced::from_file(v, path)),
            include: self
                .include
                .or_override(file.include, |v| Sourced::from_file(v, path)),
            comment: self
                .comment
                .or_override(file.comment, |v| Sourced::from_file(v, path)),
            loose_spacing: self
                .loose_spacing
                .or_override(file.loose_spacing, |v| Sourced::from_file(v, path)),
        }
    }

    /// Apply `ERRXML_*` variables. All invalid values are reported together.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        let mut parser = EnvParser::new();
        let resolved = Self {
            marker: parser.get_string("MARKER", self.marker),
            code_base: parser.get_u64("CODE_BASE", self.code_base),
            lookup_fn: parser.get_string("LOOKUP_FN", self.lookup_fn),
            include: parser.get_string("INCLUDE", self.include),
            comment: parser.get_string("COMMENT", self.comment),
            loose_spacing: parser.get_bool("LOOSE_SPACING", self.loose_spacing),
        };
        if parser.has_errors() {
            return Err(ConfigError::Environment(parser.take_errors()));
        }
        Ok(resolved)
    }

    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        Self {
            marker: self
                .marker
                .or_override(overrides.marker, |v| Sourced::from_cli(v, "--marker")),
            code_base: self
                .code_base
                .or_override(overrides.code_base, |v| Sourced::from_cli(v, "--code-base")),
            lookup_fn: self
                .lookup_fn
                .or_override(overrides.lookup_fn, |v| Sourced::from_cli(v, "--lookup-fn")),
            include: self
                .include
                .or_override(overrides.include, |v| Sourced::from_cli(v, "--include")),
            comment: self
                .comment
                .or_override(overrides.comment, |v| Sourced::from_cli(v, "--comment")),
            loose_spacing: self.loose_spacing.or_override(overrides.loose_spacing, |v| {
                Sourced::from_cli(v, "--loose-spacing")
            }),
        }
    }

    /// The plain settings, without source tracking.
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            marker: self.marker.value.clone(),
            code_base: self.code_base.value,
            lookup_fn: self.lookup_fn.value.clone(),
            include: self.include.value.clone(),
            comment: self.comment.value.clone(),
            loose_spacing: self.loose_spacing.value,
        }
    }

    /// One `(key, value, source)` row per setting, for display.
    pub fn report(&self) -> Vec<(&'static str, String, String)> {
        vec![
            (
                "marker",
                format!("{:?}", self.marker.value),
                self.marker.describe_source(),
            ),
            (
                "code_base",
                self.code_base.value.to_string(),
                self.code_base.describe_source(),
            ),
            (
                "lookup_fn",
                format!("{:?}", self.lookup_fn.value),
                self.lookup_fn.describe_source(),
            ),
            (
                "include",
                format!("{:?}", self.include.value),
                self.include.describe_source(),
            ),
            (
                "comment",
                format!("{:?}", self.comment.value),
                self.comment.describe_source(),
            ),
            (
                "loose_spacing",
                self.loose_spacing.value.to_string(),
                self.loose_spacing.describe_source(),
            ),
        ]
    }
}
