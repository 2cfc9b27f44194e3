//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Polling interval while waiting on a child with a deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Failure to run an external process to completion.
///
/// A non-zero exit status is not a `ProcessError`; callers inspect
/// `Output::status` and decide.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for `{command}`")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` did not finish within {}s and was killed", timeout.as_secs_f64())]
    Timeout { command: String, timeout: Duration },
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Value following `flag` in the argument list, e.g. the `-B` directory.
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Execute the command and wait for completion.
    pub fn exec(&self) -> Result<Output, ProcessError> {
        self.exec_with_timeout(None)
    }

    /// Execute the command, killing it if it outlives `timeout`.
    pub fn exec_with_timeout(&self, timeout: Option<Duration>) -> Result<Output, ProcessError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // A timed run gets its own process group so the whole tree can be killed.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            if timeout.is_some() {
                cmd.process_group(0);
            }
        }

        let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
            command: self.display_command(),
            source,
        })?;

        // Drain both pipes concurrently so a chatty child never blocks on a full pipe.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match timeout {
            Some(limit) => self.wait_deadline(&mut child, limit)?,
            None => child.wait().map_err(|source| ProcessError::Wait {
                command: self.display_command(),
                source,
            })?,
        };

        Ok(Output {
            status,
            stdout: join(stdout),
            stderr: join(stderr),
        })
    }

    fn wait_deadline(
        &self,
        child: &mut Child,
        limit: Duration,
    ) -> Result<ExitStatus, ProcessError> {
        let deadline = Instant::now() + limit;
        loop {
            let polled = child.try_wait().map_err(|source| ProcessError::Wait {
                command: self.display_command(),
                source,
            })?;
            if let Some(status) = polled {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                if let Err(e) = kill_tree(child) {
                    tracing::warn!("failed to kill `{}`: {}", self.display_command(), e);
                }
                let _ = child.wait();
                return Err(ProcessError::Timeout {
                    command: self.display_command(),
                    timeout: limit,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Kill `child` together with everything it spawned.
#[cfg(unix)]
fn kill_tree(child: &mut Child) -> io::Result<()> {
    let pgid = child.id() as libc::pid_t;
    // SAFETY: killpg has no memory-safety preconditions. `pgid` is the group
    // the child leads, and it has not been reaped yet.
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) -> io::Result<()> {
    child.kill()
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn join(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Runs external processes on behalf of the build driver.
///
/// The seam exists so extraction can be exercised without a real CMake.
pub trait CommandRunner: Send + Sync {
    /// Run `cmd` to completion, or until `timeout` elapses.
    fn run(&self, cmd: &ProcessBuilder, timeout: Option<Duration>) -> Result<Output, ProcessError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &ProcessBuilder, timeout: Option<Duration>) -> Result<Output, ProcessError> {
        tracing::debug!("running `{}`", cmd.display_command());
        cmd.exec_with_timeout(timeout)
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find CMake.
pub fn find_cmake() -> Option<PathBuf> {
    find_executable("cmake")
}
