//! Configuration system for errxml.
//!
//! This module provides:
//! - Environment variable parsing with type safety
//! - An optional TOML config file
//! - Source tracking for debugging
//! - Layered resolution of the generator settings

pub mod env;
pub mod file;
pub mod generator;
pub mod source;

pub use env::{EnvError, EnvParser};
pub use file::ConfigFile;
pub use generator::{
    ConfigOverrides, DEFAULT_CODE_BASE, DEFAULT_COMMENT, DEFAULT_INCLUDE, DEFAULT_INPUT,
    DEFAULT_LOOKUP_FN, DEFAULT_MARKER, GeneratorConfig, HISTORICAL_MARKER, ResolvedConfig,
};
pub use source::{ConfigSource, Sourced};

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
