// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! [`GitQuery`] backed by the `git` executable

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::query::{ConfigScope, GitQuery, LogQuery, QueryOutcome};

/// How often a child is polled while a timeout is armed
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs git commands as child processes
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
            timeout: None,
        }
    }
}

impl GitCli {
    /// Use `git` from `PATH` with no timeout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git executable
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Kill any query running longer than `timeout`
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run `git [-C repo] args...` and capture the result
    pub fn run<S: AsRef<OsStr>>(&self, repo: Option<&Path>, args: &[S]) -> QueryOutcome {
        let mut command = Command::new(&self.program);
        if let Some(repo) = repo {
            command.arg("-C").arg(repo);
        }
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(?command, "Running git");

        let output = match self.timeout {
            Some(timeout) => output_with_timeout(command, timeout),
            None => command.output().map(Some),
        };

        match output {
            Err(e) => QueryOutcome::ToolUnavailable(e.to_string()),
            Ok(None) => QueryOutcome::TimedOut,
            Ok(Some(output)) if output.status.success() => {
                QueryOutcome::Success(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(Some(output)) => QueryOutcome::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
        }
    }
}

/// Wait for a child up to `timeout`; `Ok(None)` means it was killed
fn output_with_timeout(mut command: Command, timeout: Duration) -> io::Result<Option<Output>> {
    let mut child = command.spawn()?;

    // Drain both pipes while waiting so a chatty child cannot block on a full pipe
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || drain(stdout));
    let stderr_reader = thread::spawn(move || drain(stderr));

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break Some(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            break None;
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    Ok(status.map(|status| Output {
        status,
        stdout,
        stderr,
    }))
}

fn drain(pipe: Option<impl Read>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}

impl GitQuery for GitCli {
    fn log(&self, repo: &Path, query: &LogQuery<'_>) -> QueryOutcome {
        self.run(Some(repo), query.args().as_slice())
    }

    fn branches_containing(&self, repo: &Path, sha: &str) -> QueryOutcome {
        self.run(Some(repo), &["branch", "--no-color", "--contains", sha])
    }

    fn parents(&self, repo: &Path, sha: &str) -> QueryOutcome {
        self.run(Some(repo), &["rev-list", "--parents", "-n", "1", sha])
    }

    fn config_value(&self, repo: &Path, key: &str, scope: ConfigScope) -> QueryOutcome {
        match scope {
            ConfigScope::Local => self.run(Some(repo), &["config", "--local", "--get", key]),
            ConfigScope::Global => self.run(None, &["config", "--global", "--get", key]),
        }
    }

    fn remotes(&self, repo: &Path) -> QueryOutcome {
        self.run(Some(repo), &["remote", "-v"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_tool_unavailable() {
        let git = GitCli::new().with_program("/nonexistent/bin/git-12345");
        let outcome = git.run(None, &["--version"]);
        assert!(matches!(outcome, QueryOutcome::ToolUnavailable(_)));
    }

    #[test]
    fn test_missing_program_with_timeout_is_tool_unavailable() {
        let git = GitCli::new()
            .with_program("/nonexistent/bin/git-12345")
            .with_timeout(Duration::from_secs(5));
        let outcome = git.run(None, &["--version"]);
        assert!(matches!(outcome, QueryOutcome::ToolUnavailable(_)));
    }

    #[test]
    fn test_git_version_succeeds() {
        let outcome = GitCli::new().run(None, &["--version"]);
        let output = outcome.into_output().expect("git should be installed");
        assert!(output.starts_with("git version"));
    }

    #[test]
    fn test_git_version_succeeds_with_timeout() {
        let outcome = GitCli::new()
            .with_timeout(Duration::from_secs(30))
            .run(None, &["--version"]);
        assert!(outcome.is_success());
    }

    #[test]
    fn test_non_repository_is_non_zero_exit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outcome = GitCli::new().run(Some(dir.path()), &["rev-parse", "HEAD"]);
        assert!(matches!(outcome, QueryOutcome::NonZeroExit { .. }));
    }
}
