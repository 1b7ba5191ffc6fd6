use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Writes the provided bytes to the path using an atomic persist step.
///
/// Data is flushed and fsync'd before the temporary file is renamed into
/// place so the daemon never reads a partially written configuration.
pub(crate) fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    builder.prefix(
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("hostapd"),
    );
    #[cfg(unix)]
    {
        builder.permissions(fs::Permissions::from_mode(0o600));
    }

    let mut file = builder.tempfile_in(directory)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|error| error.error)?;
    Ok(())
}

/// Reads the whole file, treating absence as `None`.
pub(crate) fn read_optional(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

/// Removes the file, returning whether it existed.
pub(crate) fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error),
    }
}
