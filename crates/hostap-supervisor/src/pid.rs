//! Process-id file parsing.

use std::path::Path;

use crate::error::SupervisorError;
use crate::files::read_optional;

/// Reads the PID recorded at `path`.
///
/// # Returns
///
/// * `Ok(Some(pid))` - the file exists and holds an integer, surrounding
///   whitespace ignored.
/// * `Ok(None)` - the file does not exist or is blank.
/// * `Err(ReadPid)` - the file could not be read.
/// * `Err(ParsePid)` - the file holds something other than an integer.
pub(crate) fn read_pid(path: &Path) -> Result<Option<u32>, SupervisorError> {
    let content = read_optional(path).map_err(|source| SupervisorError::ReadPid {
        path: path.to_path_buf(),
        source,
    })?;
    let Some(content) = content else {
        return Ok(None);
    };
    let text = String::from_utf8_lossy(&content);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|source| SupervisorError::ParsePid {
            path: path.to_path_buf(),
            source,
        })
}
