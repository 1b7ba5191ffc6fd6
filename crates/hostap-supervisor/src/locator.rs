//! Locates the daemon executable on the search path.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::PROCESS_TARGET;

/// Directory holding privileged binaries; always searched.
pub const PRIVILEGED_BIN_DIR: &str = "/sbin";

/// Abstraction over executable discovery.
pub trait ExecutableLocator {
    /// Search path reported when the executable cannot be found.
    fn search_path(&self) -> OsString;

    /// Returns the first matching executable, if any.
    fn locate(&self, name: &str) -> Option<PathBuf>;
}

/// Probes each directory of a `PATH`-style list in order.
#[derive(Debug, Clone)]
pub struct SearchPathLocator {
    path: OsString,
}

impl SearchPathLocator {
    /// Builds a locator over `path`, appending [`PRIVILEGED_BIN_DIR`] when it
    /// is not already an entry.
    #[must_use]
    pub fn new(path: impl Into<OsString>) -> Self {
        Self {
            path: with_privileged_dir(path.into()),
        }
    }

    /// Builds a locator over the process `PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(env::var_os("PATH").unwrap_or_default())
    }
}

impl ExecutableLocator for SearchPathLocator {
    fn search_path(&self) -> OsString {
        self.path.clone()
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        let found = env::split_paths(&self.path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate));
        debug!(
            target: PROCESS_TARGET,
            name,
            found = ?found,
            "probed search path for executable"
        );
        found
    }
}

/// Locator pinned to an explicit executable path.
#[derive(Debug, Clone)]
pub struct FixedLocator {
    binary: PathBuf,
}

impl FixedLocator {
    /// Wraps an explicit executable path.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl ExecutableLocator for FixedLocator {
    fn search_path(&self) -> OsString {
        self.binary.clone().into_os_string()
    }

    fn locate(&self, _name: &str) -> Option<PathBuf> {
        Some(self.binary.clone())
    }
}

fn with_privileged_dir(path: OsString) -> OsString {
    let privileged = Path::new(PRIVILEGED_BIN_DIR);
    if env::split_paths(&path).any(|dir| dir == privileged) {
        return path;
    }
    let mut entries: Vec<PathBuf> = env::split_paths(&path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .collect();
    entries.push(privileged.to_path_buf());
    env::join_paths(entries).unwrap_or(path)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
