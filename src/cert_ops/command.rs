//! External command execution
//!
//! Resolves an executable the way a shell would, runs it with an optional
//! standard input payload and captures both output streams in full.

use crate::utils::CommandError;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Captured result of a child process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the child was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn new(
        exit_code: Option<i32>,
        stdout: impl Into<Vec<u8>>,
        stderr: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Whether the child exited with status zero
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    /// Human readable exit status
    pub fn status_text(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external executables.
///
/// `Err(CommandError::NotFound)` means the executable could not be located;
/// any `Ok` value carries the exit code and both captured streams.
pub trait CommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        input: Option<&[u8]>,
    ) -> Result<CommandOutput, CommandError>;
}

/// [`CommandRunner`] backed by real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        input: Option<&[u8]>,
    ) -> Result<CommandOutput, CommandError> {
        let executable = resolve_executable(program).ok_or_else(|| CommandError::NotFound {
            program: program.to_string(),
            searched: if has_path_separator(program) {
                "the given path".to_string()
            } else {
                "PATH".to_string()
            },
        })?;

        debug!(
            program = %executable.display(),
            ?args,
            piped_input = input.is_some(),
            "Running external command"
        );

        let mut child = Command::new(&executable)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // stdin is written while wait_with_output drains stdout and stderr
        let writer = match (input, child.stdin.take()) {
            (Some(data), Some(mut stdin)) => {
                let data = data.to_vec();
                Some(thread::spawn(move || stdin.write_all(&data)))
            }
            _ => None,
        };

        let output = child.wait_with_output().map_err(|source| CommandError::Stream {
            program: program.to_string(),
            source,
        })?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!(program, "Child closed stdin before reading all input");
                }
                Ok(Err(source)) => {
                    return Err(CommandError::Stream {
                        program: program.to_string(),
                        source,
                    })
                }
                Err(_) => {
                    return Err(CommandError::Stream {
                        program: program.to_string(),
                        source: io::Error::new(io::ErrorKind::Other, "stdin writer panicked"),
                    })
                }
            }
        }

        let result = CommandOutput::new(output.status.code(), output.stdout, output.stderr);
        debug!(
            program,
            status = %result.status_text(),
            stdout_len = result.stdout.len(),
            "External command finished"
        );
        Ok(result)
    }
}

fn has_path_separator(program: &str) -> bool {
    program.contains('/') || program.contains(std::path::MAIN_SEPARATOR)
}

/// Locate `program`, either directly when it contains a path separator or
/// by scanning the `PATH` environment variable.
pub fn resolve_executable(program: &str) -> Option<PathBuf> {
    if has_path_separator(program) {
        let path = Path::new(program);
        return is_executable_file(path).then(|| path.to_path_buf());
    }

    let search_path = std::env::var_os("PATH")?;
    resolve_in(program, &search_path)
}

/// Search a `PATH`-style list of directories for an executable `program`.
///
/// Entries wrapped in double quotes are unwrapped before use.
pub fn resolve_in(program: &str, search_path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_path)
        .map(|dir| unquote(&dir).join(program))
        .find(|candidate| is_executable_file(candidate))
}

fn unquote(dir: &Path) -> PathBuf {
    match dir.to_str() {
        Some(s) if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') => {
            PathBuf::from(&s[1..s.len() - 1])
        }
        _ => dir.to_path_buf(),
    }
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}
