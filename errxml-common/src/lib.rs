//! Shared library for errxml.
//!
//! Scans a C source for error-code `case` labels such as
//! `case EINVAL: return ERROR_BASE+14;` and renders a C program that, when
//! compiled against the library, prints an XML document pairing each code
//! with its runtime description.

pub mod config;
pub mod entry;
pub mod errors;
pub mod extract;
pub mod generate;
pub mod logging;
pub mod render;
pub mod source;

pub use config::{ConfigOverrides, GeneratorConfig, ResolvedConfig};
pub use entry::{ErrorCodeEntry, ResolvedEntry};
pub use errors::{ConfigError, GenerateError};
pub use extract::{ExtractConfig, Extractor};
pub use generate::{
    collect_entries, generate, generate_from_path, generate_with, resolve_entries, write_program,
};
pub use logging::{LogConfig, LogFormat, LoggingGuards, init_logging};
pub use render::ProgramTemplate;
pub use source::read_lines;
