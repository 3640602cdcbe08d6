//! Reading the scanned C source.

use crate::errors::GenerateError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Read every line of `path`.
///
/// Line endings (`\n` or `\r\n`) are stripped and bytes that are not valid
/// UTF-8 are replaced, so sources in legacy encodings still scan. The file
/// handle is closed before returning, on success and on failure.
pub fn read_lines(path: &Path) -> Result<Vec<String>, GenerateError> {
    let unreadable = |source| GenerateError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    let mut reader = BufReader::new(file);
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(unreadable)?;
        if read == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }

    debug!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}
