//! Runs short-lived child processes and captures their output.
//!
//! Only the most recent chunk read from each stream is kept. `hostapd -B`
//! prints a handful of lines before detaching, and the final fragment is
//! what callers surface in diagnostics; earlier chunks are overwritten
//! rather than concatenated.

use std::ffi::OsString;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::PROCESS_TARGET;

const CHUNK_SIZE: usize = 8 * 1024;

/// Exit code and trailing output of a completed launcher process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOutput {
    /// Exit code, absent when the process was terminated by a signal.
    pub code: Option<i32>,
    /// Last trimmed chunk read from stdout.
    pub stdout: Option<String>,
    /// Last trimmed chunk read from stderr.
    pub stderr: Option<String>,
}

impl LaunchOutput {
    /// Output of a process that exited with `code` and printed nothing.
    #[must_use]
    pub const fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            stdout: None,
            stderr: None,
        }
    }

    /// Whether the process exited with code zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Abstraction over running a process to completion.
pub trait ProcessLauncher {
    /// Spawns `program` with `args` and blocks until it exits and both output
    /// streams are closed.
    ///
    /// # Errors
    ///
    /// Returns the IO error raised while spawning, reading from or waiting on
    /// the process. A non-zero exit is not an error at this layer.
    fn launch(&self, program: &Path, args: &[OsString]) -> io::Result<LaunchOutput>;
}

/// Launcher backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, program: &Path, args: &[OsString]) -> io::Result<LaunchOutput> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        debug!(
            target: PROCESS_TARGET,
            program = %program.display(),
            pid = child.id(),
            "spawned child process"
        );

        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);
        let status = child.wait()?;
        let stdout = join_reader(stdout)?;
        let stderr = join_reader(stderr)?;

        debug!(
            target: PROCESS_TARGET,
            program = %program.display(),
            code = ?status.code(),
            "child process exited"
        );
        Ok(LaunchOutput {
            code: status.code(),
            stdout,
            stderr,
        })
    }
}

type Reader = JoinHandle<io::Result<Option<String>>>;

fn spawn_reader<R>(stream: R) -> Reader
where
    R: Read + Send + 'static,
{
    thread::spawn(move || last_chunk(stream))
}

fn join_reader(reader: Option<Reader>) -> io::Result<Option<String>> {
    match reader {
        Some(handle) => handle
            .join()
            .map_err(|_| io::Error::other("output reader thread panicked"))?,
        None => Ok(None),
    }
}

/// Drains `reader`, returning the last chunk received, trimmed.
pub(crate) fn last_chunk(mut reader: impl Read) -> io::Result<Option<String>> {
    let mut buffer = vec![0_u8; CHUNK_SIZE];
    let mut last = None;
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => return Ok(last),
            Ok(read) => {
                if let Some(chunk) = buffer.get(..read) {
                    last = Some(String::from_utf8_lossy(chunk).trim().to_owned());
                }
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
}
