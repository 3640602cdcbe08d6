//! Line matcher for error-code `case` labels.
//!
//! A line matches when it contains `case E<UPPER>+`, at least one more
//! character, then the marker immediately followed by decimal digits:
//!
//! ```text
//!     case EINVAL:    return ERROR_BASE+14;
//!          ^^^^^^                       ^^
//!          name                         offset
//! ```
//!
//! The pattern is unanchored and the gap between name and marker is greedy,
//! so with two markers on one line the last one wins.

use crate::entry::ErrorCodeEntry;
use crate::errors::ConfigError;
use regex::Regex;
use tracing::{debug, trace};

/// Matcher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Literal text preceding the offset, e.g. `ERROR_BASE+`.
    pub marker: String,
    /// Allow whitespace around each `+` of the marker (`ERROR_BASE + 14`).
    pub loose_spacing: bool,
}

/// Compiled line matcher.
#[derive(Debug, Clone)]
pub struct Extractor {
    pattern: Regex,
}

impl Extractor {
    pub fn new(config: &ExtractConfig) -> Result<Self, ConfigError> {
        if config.marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }

        let marker = marker_pattern(&config.marker, config.loose_spacing);
        let pattern = Regex::new(&format!(r"case (E[A-Z]+).+{marker}([0-9]+)")).map_err(
            |source| ConfigError::Pattern {
                marker: config.marker.clone(),
                source,
            },
        )?;
        debug!("Compiled line pattern: {}", pattern.as_str());

        Ok(Self { pattern })
    }

    /// Match one line, yielding an entry or nothing.
    pub fn match_line(&self, line: &str) -> Option<ErrorCodeEntry> {
        let caps = self.pattern.captures(line)?;
        let name = caps.get(1)?.as_str();
        let digits = caps.get(2)?.as_str();

        match digits.parse::<u64>() {
            Ok(offset) => {
                trace!("Matched {} at offset {}", name, offset);
                Some(ErrorCodeEntry::new(name, offset))
            }
            Err(_) => {
                debug!("Skipping {}: offset {} does not fit in u64", name, digits);
                None
            }
        }
    }

    /// Entries for every matching line, in input order, duplicates kept.
    pub fn extract<'a, I, S>(&'a self, lines: I) -> impl Iterator<Item = ErrorCodeEntry> + 'a
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(move |line| self.match_line(line.as_ref()))
    }
}

fn marker_pattern(marker: &str, loose_spacing: bool) -> String {
    if !loose_spacing {
        return regex::escape(marker);
    }
    marker
        .split('+')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s*\+\s*")
}
