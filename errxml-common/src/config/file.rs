//! Optional TOML config file.
//!
//! ```toml
//! marker = "NN_HAUSNUMERO+"
//! code_base = 156384712
//! lookup_fn = "nn_strerror"
//! include = "nanomsg/nn.h"
//! comment = "NANOMSG library error codes"
//! loose_spacing = true
//! ```

use crate::errors::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Settings read from a config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub marker: Option<String>,
    pub code_base: Option<u64>,
    pub lookup_fn: Option<String>,
    pub include: Option<String>,
    pub comment: Option<String>,
    pub loose_spacing: Option<bool>,
}

impl ConfigFile {
    /// Parse config file contents. `path` is only used for error messages.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::FileInvalid {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content, path)
    }
}
