//! Error-code entries pulled out of `case` labels.

use serde::Serialize;

/// One `case EXXX: ... <marker><offset>` line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCodeEntry {
    /// Identifier matching `E[A-Z]+`.
    pub name: String,
    /// Decimal offset following the marker.
    pub offset: u64,
}

impl ErrorCodeEntry {
    pub fn new(name: impl Into<String>, offset: u64) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }

    /// Code in the documentation code space, or `None` if it overflows.
    pub fn code(&self, base: u64) -> Option<u64> {
        self.offset.checked_add(base)
    }

    pub fn resolve(self, base: u64) -> Option<ResolvedEntry> {
        let code = self.code(base)?;
        Some(ResolvedEntry {
            name: self.name,
            offset: self.offset,
            code,
        })
    }
}

/// An entry with its external code computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry {
    pub name: String,
    pub offset: u64,
    pub code: u64,
}
